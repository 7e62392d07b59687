use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use super::access::AssignmentAccess;
use super::avatar::{AvatarOptions, PictureSubject, render_user_picture};
use super::{RequestContext, resolve_target};
use crate::config::AdminCommentsConfig;
use crate::errors::{AdminCommentError, Result};
use crate::models::admincomments::entities::Comment;
use crate::models::admincomments::requests::CommentOptions;
use crate::models::assignments::entities::Assignment;
use crate::models::users::entities::GuestIdentity;
use crate::storage::Storage;

/// 匿名评分下某评论者的显示身份
#[derive(Debug, Clone, PartialEq)]
struct HiddenIdentity {
    fullname: String,
    avatar: String,
}

impl HiddenIdentity {
    fn new(anonymous_id: i64, guest: &GuestIdentity, settings: &AdminCommentsConfig) -> Self {
        let fullname = format!("{} {}", settings.hidden_user_label.trim(), anonymous_id);
        let avatar = render_user_picture(
            &PictureSubject {
                id: guest.id,
                fullname: &fullname,
                image_alt: &guest.image_alt,
            },
            AvatarOptions {
                size: settings.avatar_size,
                link: false,
            },
            settings,
        );
        Self { fullname, avatar }
    }
}

/// 渲染前过滤评论
///
/// 匿名评分时把评论者替换为作业内的匿名身份，并清除非本人评论的删除按钮
/// （持有覆盖权限除外）。返回的序列与输入顺序一致。
pub async fn filter_for_display(
    storage: &dyn Storage,
    ctx: &RequestContext,
    comments: Vec<Comment>,
    options: &CommentOptions,
) -> Result<Vec<Comment>> {
    let target = resolve_target(storage, options).await?;
    let mut comments = comments;

    if target.assignment.blind_marking && !comments.is_empty() {
        anonymize(storage, &target.assignment, &ctx.settings, &mut comments).await?;
    }

    let access = AssignmentAccess::new(storage, &ctx.actor, &target.assignment, &ctx.settings);
    let can_delete_others = access.can_delete_others();
    for comment in comments.iter_mut() {
        if comment.user_id != ctx.actor.id && !can_delete_others {
            comment.delete = false;
        }
    }

    Ok(comments)
}

/// 为每位评论者生成一次匿名身份，同一批次内复用
async fn anonymize(
    storage: &dyn Storage,
    assignment: &Assignment,
    settings: &AdminCommentsConfig,
    comments: &mut [Comment],
) -> Result<()> {
    let guest = storage
        .get_guest_user()
        .await?
        .ok_or_else(|| AdminCommentError::not_found("系统访客用户不存在"))?;

    let mut identities: HashMap<i64, HiddenIdentity> = HashMap::new();
    for comment in comments.iter_mut() {
        let identity = match identities.entry(comment.user_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let anonymous_id = storage
                    .get_or_create_user_mapping(assignment.id, comment.user_id)
                    .await?;
                entry.insert(HiddenIdentity::new(anonymous_id, &guest, settings))
            }
        };

        comment.fullname = Some(identity.fullname.clone());
        comment.avatar = Some(identity.avatar.clone());
        comment.profile_url = None;
    }

    debug!(
        "Anonymized {} comment(s) from {} commenter(s) on assignment {}",
        comments.len(),
        identities.len(),
        assignment.id
    );
    Ok(())
}
