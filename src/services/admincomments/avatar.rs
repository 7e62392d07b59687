//! 头像标记渲染

use crate::config::AdminCommentsConfig;

/// 小于等于该尺寸时使用小号默认头像
const SMALL_PICTURE_MAX: u32 = 35;

#[derive(Debug, Clone, Copy)]
pub struct AvatarOptions {
    pub size: u32,
    pub link: bool,
}

/// 需要渲染头像的用户
#[derive(Debug, Clone)]
pub struct PictureSubject<'a> {
    pub id: i64,
    pub fullname: &'a str,
    pub image_alt: &'a str,
}

/// 渲染默认头像 `<img>` 标记，`link` 为真时包裹个人主页链接
pub fn render_user_picture(
    subject: &PictureSubject<'_>,
    options: AvatarOptions,
    settings: &AdminCommentsConfig,
) -> String {
    let variant = if options.size <= SMALL_PICTURE_MAX {
        "f2"
    } else {
        "f1"
    };

    let alt = if subject.image_alt.is_empty() {
        format!("Picture of {}", subject.fullname)
    } else {
        subject.image_alt.to_string()
    };
    let alt = escape_attribute(&alt);

    let img = format!(
        r#"<img src="{}/u/{}" class="userpicture defaultuserpic" width="{size}" height="{size}" alt="{alt}" title="{alt}" />"#,
        escape_attribute(settings.avatar_base_url.trim_end_matches('/')),
        variant,
        size = options.size,
        alt = alt,
    );

    if options.link {
        format!(
            r#"<a href="{}?id={}">{}</a>"#,
            escape_attribute(&settings.profile_base_url),
            subject.id,
            img
        )
    } else {
        img
    }
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject<'a>(fullname: &'a str, image_alt: &'a str) -> PictureSubject<'a> {
        PictureSubject {
            id: 1,
            fullname,
            image_alt,
        }
    }

    #[test]
    fn test_small_unlinked_picture() {
        let settings = AdminCommentsConfig::default();
        let html = render_user_picture(
            &subject("Hidden user 3", ""),
            AvatarOptions {
                size: 18,
                link: false,
            },
            &settings,
        );
        assert_eq!(
            html,
            r#"<img src="/theme/image.php/boost/core/1/u/f2" class="userpicture defaultuserpic" width="18" height="18" alt="Picture of Hidden user 3" title="Picture of Hidden user 3" />"#
        );
    }

    #[test]
    fn test_large_linked_picture_uses_alt_text() {
        let settings = AdminCommentsConfig::default();
        let html = render_user_picture(
            &subject("Hidden user 3", "Guest"),
            AvatarOptions {
                size: 100,
                link: true,
            },
            &settings,
        );
        assert!(html.starts_with(r#"<a href="/user/view.php?id=1">"#));
        assert!(html.contains("/u/f1"));
        assert!(html.contains(r#"alt="Guest""#));
        assert!(html.ends_with("</a>"));
    }

    #[test]
    fn test_attributes_are_escaped() {
        let settings = AdminCommentsConfig::default();
        let html = render_user_picture(
            &subject(r#"<b>"x"</b>"#, ""),
            AvatarOptions {
                size: 18,
                link: false,
            },
            &settings,
        );
        assert!(html.contains("Picture of &lt;b&gt;&quot;x&quot;&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }
}
