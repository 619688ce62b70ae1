//! Format-independent profile document.

use roster_core::escape::escape_html;
use roster_core::types::Timestamp;
use roster_db::models::character::Character;

/// Heading printed at the top of every profile.
pub const PROFILE_TITLE: &str = "Character Profile";

/// One labeled line of the profile body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileField {
    pub label: &'static str,
    pub value: String,
}

/// Everything a profile shows, in display order.
///
/// Values are kept raw here; each encoder applies the escaping its output
/// format needs.
#[derive(Debug, Clone)]
pub struct ProfileDocument {
    pub title: String,
    pub subject: String,
    pub fields: Vec<ProfileField>,
    pub photo_url: Option<String>,
    pub generated_at: Timestamp,
}

impl ProfileDocument {
    pub fn from_character(character: &Character, generated_at: Timestamp) -> Self {
        let fields = vec![
            ProfileField {
                label: "Name",
                value: character.name.clone(),
            },
            ProfileField {
                label: "Signature color",
                value: character.color.clone(),
            },
            ProfileField {
                label: "Type",
                value: character.kind.clone(),
            },
            ProfileField {
                label: "Level",
                value: character.level.to_string(),
            },
        ];

        Self {
            title: PROFILE_TITLE.to_string(),
            subject: character.name.clone(),
            fields,
            photo_url: character.photo_url().map(str::to_string),
            generated_at,
        }
    }

    /// Footer line with the generation time, e.g. `Generated by Roster - 16/10/2026 09:30`.
    pub fn footer(&self) -> String {
        format!(
            "Generated by Roster - {}",
            self.generated_at.format("%d/%m/%Y %H:%M")
        )
    }

    /// Encode as a standalone HTML document.
    ///
    /// Every value taken from the character, the photo URL included, is
    /// entity-escaped before it is placed in text or an attribute.
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(2048);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&self.subject)));
        html.push_str(STYLE);
        html.push_str("</head>\n<body>\n<div class=\"container\">\n");
        html.push_str(&format!("<h1 class=\"title\">{}</h1>\n<hr>\n", escape_html(&self.title)));

        if let Some(url) = &self.photo_url {
            html.push_str(&format!(
                "<img class=\"profile-img\" src=\"{}\" alt=\"Photo of {}\">\n",
                escape_html(url),
                escape_html(&self.subject),
            ));
        }

        for field in &self.fields {
            html.push_str(&format!(
                "<div class=\"info\"><strong>{}:</strong> {}</div>\n",
                escape_html(field.label),
                escape_html(&field.value),
            ));
        }

        html.push_str(&format!(
            "<hr>\n<div class=\"footer\">{}</div>\n</div>\n</body>\n</html>\n",
            escape_html(&self.footer())
        ));
        html
    }
}

const STYLE: &str = "<style>
body { font-family: Arial, sans-serif; color: #333; margin: 0; padding: 20px; }
.container { max-width: 800px; margin: 0 auto; text-align: center; }
.title { font-size: 24px; color: #0066cc; margin-bottom: 20px; font-weight: bold; }
.profile-img { max-width: 200px; border-radius: 10px; margin: 0 auto 20px; display: block; }
.info { font-size: 16px; margin: 10px 0; text-align: left; padding-left: 20%; }
.info strong { display: inline-block; width: 180px; }
hr { border: 0; height: 1px; background: #ddd; margin: 20px 0; }
.footer { font-size: 12px; color: #777; margin-top: 30px; }
</style>
";

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn character(name: &str, color: &str, kind: &str, level: i32, photo: &str) -> Character {
        let now = Utc::now();
        Character {
            id: 1,
            name: name.to_string(),
            color: color.to_string(),
            kind: kind.to_string(),
            level,
            photo: photo.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn fixed_time() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    #[test]
    fn heisenberg_profile_contains_every_field() {
        let c = character("Heisenberg", "blue", "cook", 99, "https://x.test/w.jpg");
        let html = ProfileDocument::from_character(&c, fixed_time()).to_html();

        for needle in ["Heisenberg", "blue", "cook", "99"] {
            assert!(html.contains(needle), "missing {needle}");
        }
        assert!(html.contains("<img class=\"profile-img\" src=\"https://x.test/w.jpg\""));
        assert!(html.contains("Generated by Roster - 16/10/2026 09:30"));
    }

    #[test]
    fn markup_in_fields_is_escaped() {
        let c = character(
            "<script>alert(1)</script>",
            "\"><img src=x onerror=alert(2)>",
            "<b>boss</b>",
            1,
            "https://x.test/a.png?q=\"><script>",
        );
        let html = ProfileDocument::from_character(&c, fixed_time()).to_html();

        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>boss"));
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&quot;&gt;&lt;img src=x onerror=alert(2)&gt;"));
        assert!(html.contains("src=\"https://x.test/a.png?q=&quot;&gt;&lt;script&gt;\""));
    }

    #[test]
    fn no_photo_means_no_image_tag() {
        let c = character("Skyler", "", "", 0, "");
        let doc = ProfileDocument::from_character(&c, fixed_time());

        assert!(doc.photo_url.is_none());
        assert!(!doc.to_html().contains("<img"));
    }

    #[test]
    fn fields_are_in_display_order() {
        let c = character("Gus", "yellow", "boss", 80, "");
        let doc = ProfileDocument::from_character(&c, fixed_time());

        let labels: Vec<&str> = doc.fields.iter().map(|f| f.label).collect();
        assert_eq!(labels, ["Name", "Signature color", "Type", "Level"]);
        assert_eq!(doc.fields[3].value, "80");
    }
}
