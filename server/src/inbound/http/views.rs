//! Server-rendered HTML pages.
//!
//! Pages are plain formatted strings behind a tiny escape helper; the
//! markup carries no logic beyond laying out records and re-displaying
//! field errors next to the inputs that produced them.

use std::fmt::Write as _;

use crate::domain::{FieldError, User, UserInput};

/// Escape text for interpolation into HTML element or attribute content.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n\
         <nav><a href=\"/\">User list</a> | <a href=\"/create\">New user</a> | \
         <a href=\"/search\">Search</a></nav>\n\
         <h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape(title),
        body = body,
    )
}

fn user_rows(users: &[&User]) -> String {
    let mut rows = String::new();
    for user in users {
        let age = user.age.map(|a| a.to_string()).unwrap_or_default();
        let bio = user.bio.as_deref().unwrap_or_default();
        let _ = write!(
            rows,
            "<tr><td>{id}</td><td>{name}</td><td>{email}</td><td>{age}</td><td>{bio}</td>\
             <td><a href=\"/update/{id}\">Edit</a> \
             <form method=\"post\" action=\"/delete/{id}\" style=\"display:inline\">\
             <button type=\"submit\">Delete</button></form></td></tr>\n",
            id = user.id,
            name = escape(&user.full_name()),
            email = escape(&user.email),
            age = age,
            bio = escape(bio),
        );
    }
    rows
}

fn user_table(users: &[&User]) -> String {
    if users.is_empty() {
        return "<p>No users found.</p>\n".to_owned();
    }
    format!(
        "<table>\n<thead><tr><th>Id</th><th>Name</th><th>Email</th><th>Age</th>\
         <th>Bio</th><th></th></tr></thead>\n<tbody>\n{}</tbody>\n</table>\n",
        user_rows(users),
    )
}

/// The index page listing every stored record.
pub fn user_list_page(users: &[User]) -> String {
    let refs: Vec<&User> = users.iter().collect();
    layout("User list", &user_table(&refs))
}

/// Search form plus the records matching the submitted criteria.
pub fn search_page(name: &str, email: &str, users: &[&User]) -> String {
    let form = format!(
        "<form method=\"get\" action=\"/search\">\n\
         <label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label>\n\
         <label>Email <input type=\"text\" name=\"email\" value=\"{email}\"></label>\n\
         <button type=\"submit\">Search</button>\n</form>\n",
        name = escape(name),
        email = escape(email),
    );
    layout("Search results", &format!("{form}{}", user_table(users)))
}

fn field_errors(errors: &[FieldError], field: &str) -> String {
    let mut items = String::new();
    for err in errors.iter().filter(|err| err.field == field) {
        let _ = write!(items, "<li>{}</li>", escape(err.message));
    }
    if items.is_empty() {
        String::new()
    } else {
        format!("<ul class=\"field-errors\">{items}</ul>\n")
    }
}

/// The create/update form, pre-filled with the submitted values and any
/// validation errors rendered next to their fields.
pub fn user_form_page(
    title: &str,
    action: &str,
    values: &UserInput,
    errors: &[FieldError],
) -> String {
    let body = format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>First name <input type=\"text\" name=\"firstName\" value=\"{first}\"></label>\n\
         {first_errors}\
         <label>Last name <input type=\"text\" name=\"lastName\" value=\"{last}\"></label>\n\
         {last_errors}\
         <label>Email <input type=\"text\" name=\"email\" value=\"{email}\"></label>\n\
         {email_errors}\
         <label>Age <input type=\"text\" name=\"age\" value=\"{age}\"></label>\n\
         {age_errors}\
         <label>Bio <textarea name=\"bio\">{bio}</textarea></label>\n\
         {bio_errors}\
         <button type=\"submit\">Save</button>\n</form>\n",
        action = escape(action),
        first = escape(&values.first_name),
        first_errors = field_errors(errors, "firstName"),
        last = escape(&values.last_name),
        last_errors = field_errors(errors, "lastName"),
        email = escape(&values.email),
        email_errors = field_errors(errors, "email"),
        age = escape(&values.age),
        age_errors = field_errors(errors, "age"),
        bio = escape(&values.bio),
        bio_errors = field_errors(errors, "bio"),
    );
    layout(title, &body)
}
