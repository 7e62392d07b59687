pub mod admincomments;

pub use admincomments::AdminCommentService;
