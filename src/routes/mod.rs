pub mod admincomments;

pub use admincomments::configure_admincomments_routes;
