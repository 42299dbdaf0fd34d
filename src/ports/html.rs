// src/ports/html.rs
use crate::application::{FormFields, ListView, NotesFooter, PageSnapshot};
use crate::constants::{NOTES_FOOTER_TAG, NOTES_FORM_TAG, NOTES_LIST_TAG};
use crate::domain::Note;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::instrument;

const FORM_STYLE: &str = r#"<style>
    form {
        display: grid;
        gap: 10px;
        padding: 20px;
    }
    label {
        font-weight: bold;
    }
    input, textarea {
        padding: 10px;
        border: 1px solid #ccc;
        border-radius: 5px;
        width: 100%;
    }
    button {
        padding: 10px;
        background-color: #007bff;
        color: white;
        border: none;
        border-radius: 5px;
        cursor: pointer;
    }
    button:hover {
        background-color: #0056b3;
    }
    .loading {
        text-align: center;
        font-size: 14px;
        color: #007bff;
    }
</style>"#;

const LIST_STYLE: &str = r#"<style>
    .loading {
        text-align: center;
        font-size: 18px;
        color: #007bff;
        margin-top: 20px;
    }
    .container {
        display: grid;
        grid-template-columns: repeat(3, 1fr);
        gap: 20px;
        padding: 20px;
    }
    .note {
        padding: 15px;
        background-color: #f1f1f1;
        border-radius: 10px;
        position: relative;
    }
    h2 {
        font-size: 1.2rem;
        font-weight: bold;
    }
    p {
        font-size: 1rem;
    }
    .delete-btn {
        position: absolute;
        top: 10px;
        right: 10px;
        background: red;
        color: white;
        border: none;
        padding: 5px 10px;
        cursor: pointer;
        border-radius: 5px;
    }
</style>"#;

const FOOTER_STYLE: &str = r#"<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
<style>
    .footer {
        padding: 20px 30px 20px;
        background-color: #000000;
        justify-content: center;
        align-items: center;
    }
    .icon {
        display: flex;
        justify-content: center;
        align-items: center;
    }
    .icon a {
        padding: 10px;
        margin: 10px;
        text-decoration: none;
        background-color: #ffffff;
        border-radius: 50%;
        transition: 0.5s;
    }
    .icon a i {
        display: flex;
        justify-content: center;
        font-size: 1.7em;
        color: black;
        transition: 0.5s;
    }
    .icon a i:hover {
        color: rgb(255, 255, 255);
    }
    .icon a:hover {
        background-color: black;
    }
    .copy {
        display: flex;
        justify-content: center;
        align-items: center;
    }
    .copy p {
        padding: 10px;
        color: #ffffff;
        font-size: 15px;
    }
</style>"#;

/// Renders element shadow markup and the hosting page.
///
/// Note titles, bodies and ids are escaped; the service's content is not trusted.
#[derive(Debug, Default)]
pub struct HtmlPresenter;

fn display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render_form(&self, fields: &FormFields, loading: bool) -> String {
        format!(
            r#"{style}
<form id="notes-form">
    <label for="title">Title:</label>
    <input type="text" id="title" name="title" value="{title}" required>
    <label for="body">Body:</label>
    <textarea id="body" name="body" required>{body}</textarea>
    <button type="submit">Add Note</button>
    <p class="loading" style="display: {loading}">Adding note...</p>
</form>"#,
            style = FORM_STYLE,
            title = encode_double_quoted_attribute(&fields.title),
            body = encode_text(&fields.body),
            loading = display(loading),
        )
    }

    #[instrument(level = "trace", skip(self), ret)]
    pub fn render_card(&self, note: &Note) -> String {
        format!(
            r#"<div class="note">
    <h2>{title}</h2>
    <p>{body}</p>
    <button class="delete-btn" data-id="{id}">Delete</button>
</div>"#,
            title = encode_text(&note.title),
            body = encode_text(&note.body),
            id = encode_double_quoted_attribute(&note.id),
        )
    }

    /// The list's markup depends only on the notes and the loading flag, never
    /// on the revision, so identical collections render identically.
    pub fn render_list(&self, view: &ListView) -> String {
        let cards: Vec<String> = view.notes.iter().map(|note| self.render_card(note)).collect();

        format!(
            r#"{style}
<p class="loading" style="display: {loading}">Loading notes...</p>
<div class="container">
{cards}
</div>"#,
            style = LIST_STYLE,
            loading = display(view.loading),
            cards = cards.join("\n"),
        )
    }

    pub fn render_footer(&self, footer: &NotesFooter) -> String {
        let links: Vec<String> = footer
            .links()
            .iter()
            .map(|link| {
                format!(
                    r#"<a href="{href}" aria-label="{label}"><i class="{icon}"></i></a>"#,
                    href = encode_double_quoted_attribute(&link.href),
                    label = encode_double_quoted_attribute(&link.label),
                    icon = encode_double_quoted_attribute(&link.icon),
                )
            })
            .collect();

        format!(
            r#"{style}
<footer class="footer">
    <div class="icon">
        {links}
    </div>
    <div class="copy"><p>{copyright}</p></div>
</footer>"#,
            style = FOOTER_STYLE,
            links = links.join("\n        "),
            copyright = encode_text(footer.copyright()),
        )
    }

    /// Wrap shadow markup in its element tag as an open declarative shadow root
    pub fn render_element(&self, tag: &str, shadow: &str) -> String {
        format!(
            r#"<{tag}>
<template shadowrootmode="open">
{shadow}
</template>
</{tag}>"#
        )
    }

    pub fn render_page(&self, page: &PageSnapshot) -> String {
        let form = self.render_element(NOTES_FORM_TAG, &self.render_form(&page.form, page.form_loading));
        let list = self.render_element(NOTES_LIST_TAG, &self.render_list(&page.list));
        let footer = self.render_element(NOTES_FOOTER_TAG, &self.render_footer(&page.footer));

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Notes App</title>
    <style>
        body {{
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
        }}
    </style>
</head>
<body>
{form}
{list}
{footer}
</body>
</html>"#
        )
    }
}
