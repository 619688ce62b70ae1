//! Server-rendered HTML pages.
//!
//! Every value that originates from a user or the database passes through
//! [`escape_html`] before it is placed in text or an attribute.

use roster_core::character::CharacterInput;
use roster_core::escape::escape_html;
use roster_core::types::DbId;
use roster_db::models::character::Character;

use crate::flash::Flash;

const STYLE: &str = "<style>
body { font-family: Arial, sans-serif; margin: 2rem auto; max-width: 960px; color: #222; }
header { display: flex; justify-content: space-between; align-items: center; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #ddd; padding: 0.5rem; text-align: left; }
.alert { padding: 0.75rem 1rem; border-radius: 4px; margin: 1rem 0; }
.alert-success { background: #d1e7dd; color: #0f5132; }
.alert-danger { background: #f8d7da; color: #842029; }
.thumb { width: 50px; height: 50px; border-radius: 50%; object-fit: cover; }
label { display: block; margin-top: 0.75rem; }
</style>
";

/// Wrap `body` in the shared page chrome.
pub fn layout(title: &str, username: Option<&str>, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");
    if let Some(name) = username {
        html.push_str(&format!(
            "<header><h1>Roster</h1><div>Welcome, {} <a href=\"/logout\">Log out</a></div></header>\n",
            escape_html(name)
        ));
    }
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

fn flash_banner(flash: &Flash) -> String {
    format!(
        "<div class=\"alert alert-{}\">{}</div>\n",
        flash.kind.as_str(),
        escape_html(&flash.message)
    )
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

pub fn list_page(username: &str, characters: &[Character], flash: Option<&Flash>) -> String {
    let mut body = String::new();
    if let Some(flash) = flash {
        body.push_str(&flash_banner(flash));
    }
    body.push_str("<p><a href=\"/characters/new\">Add character</a></p>\n");

    if characters.is_empty() {
        body.push_str("<p>No characters yet.</p>\n");
        return layout("Characters", Some(username), &body);
    }

    body.push_str(
        "<table>\n<thead><tr><th>Photo</th><th>Name</th><th>Color</th><th>Type</th>\
         <th>Level</th><th>Actions</th></tr></thead>\n<tbody>\n",
    );
    for c in characters {
        let photo = match c.photo_url() {
            Some(url) => format!(
                "<img class=\"thumb\" src=\"{}\" alt=\"\">",
                escape_html(url)
            ),
            None => String::new(),
        };
        body.push_str(&format!(
            "<tr><td>{photo}</td><td>{name}</td><td>{color}</td><td>{kind}</td><td>{level}</td>\
             <td><a href=\"/characters/edit?id={id}\">Edit</a> \
             <a href=\"/characters/delete?id={id}\">Delete</a> \
             <a href=\"/characters/export?id={id}\">PDF</a></td></tr>\n",
            name = escape_html(&c.name),
            color = escape_html(&c.color),
            kind = escape_html(&c.kind),
            level = c.level,
            id = c.id,
        ));
    }
    body.push_str("</tbody>\n</table>\n");
    layout("Characters", Some(username), &body)
}

// ---------------------------------------------------------------------------
// Create / edit form
// ---------------------------------------------------------------------------

/// Which operation a character form submits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(DbId),
}

impl FormMode {
    fn action(self) -> String {
        match self {
            Self::Create => "/characters/new".to_string(),
            Self::Edit(id) => format!("/characters/edit?id={id}"),
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Self::Create => "Add character",
            Self::Edit(_) => "Edit character",
        }
    }
}

/// Render the form with `values` filled in and `errors` listed above it.
pub fn character_form_page(
    username: &str,
    mode: FormMode,
    values: &CharacterInput,
    errors: &[String],
) -> String {
    let mut body = format!("<h2>{}</h2>\n", mode.heading());

    if !errors.is_empty() {
        body.push_str("<div class=\"alert alert-danger\"><ul>\n");
        for error in errors {
            body.push_str(&format!("<li>{}</li>\n", escape_html(error)));
        }
        body.push_str("</ul></div>\n");
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\">\n",
        escape_html(&mode.action())
    ));
    for (name, label, input_type, value) in [
        ("name", "Name", "text", &values.name),
        ("color", "Signature color", "text", &values.color),
        ("type", "Type", "text", &values.kind),
        ("level", "Level", "number", &values.level),
        ("photo", "Photo (URL)", "url", &values.photo),
    ] {
        body.push_str(&format!(
            "<label>{label}: <input type=\"{input_type}\" name=\"{name}\" value=\"{}\"></label>\n",
            escape_html(value)
        ));
    }
    body.push_str(
        "<p><button type=\"submit\">Save</button> <a href=\"/\">Cancel</a></p>\n</form>\n",
    );

    layout(mode.heading(), Some(username), &body)
}

/// Form values for an existing record.
pub fn input_from_character(character: &Character) -> CharacterInput {
    CharacterInput {
        name: character.name.clone(),
        color: character.color.clone(),
        kind: character.kind.clone(),
        level: character.level.to_string(),
        photo: character.photo.clone(),
    }
}

// ---------------------------------------------------------------------------
// Login / error
// ---------------------------------------------------------------------------

pub fn login_page(username: &str, error: Option<&str>) -> String {
    let mut body = String::from("<h1>Roster</h1>\n<h2>Sign in</h2>\n");
    if let Some(error) = error {
        body.push_str(&format!(
            "<div class=\"alert alert-danger\">{}</div>\n",
            escape_html(error)
        ));
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"/login\">\n\
         <label>Username: <input type=\"text\" name=\"username\" value=\"{}\" required></label>\n\
         <label>Password: <input type=\"password\" name=\"password\" required></label>\n\
         <p><button type=\"submit\">Sign in</button></p>\n</form>\n",
        escape_html(username)
    ));
    layout("Sign in", None, &body)
}

pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<h2>{}</h2>\n<p>{}</p>\n<p><a href=\"/\">Back to the list</a></p>\n",
        escape_html(title),
        escape_html(message)
    );
    layout(title, None, &body)
}
