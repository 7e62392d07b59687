//! 预导入模块，方便使用

pub use super::assign_user_mapping::{
    ActiveModel as AssignUserMappingActiveModel, Entity as AssignUserMappings,
    Model as AssignUserMappingModel,
};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::capability_grants::{
    ActiveModel as CapabilityGrantActiveModel, Entity as CapabilityGrants,
    Model as CapabilityGrantModel,
};
pub use super::group_members::{
    ActiveModel as GroupMemberActiveModel, Entity as GroupMembers, Model as GroupMemberModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
