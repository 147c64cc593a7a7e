//! HTML rendering of the outreach form page

use outreach_llm::Category;
use std::fmt::Write;

use crate::types::OutreachForm;
use crate::workflow::{DraftError, DraftErrorKind, DraftOutcome, Stage};

const PAGE_TITLE: &str = "Email Outreach";
const HEADER: &str = "Email Outreach Builder";
const INTRO: &str =
    "This will allow a user to input some details about an opportunity and get an email output draft.";

/// Text area definition: (form name, label, placeholder)
const TEXT_FIELDS: [(&str, &str, &str); 4] = [
    (
        "description",
        "Core job description",
        "Paste the core description of the opportunity here, to give the system context about the opportunity",
    ),
    (
        "key_message",
        "Key Emphasis",
        "Write 1 or 2 sentences that the email should focus on. What can we offer this person?",
    ),
    ("contact_name", "Contact Name", "Opportunity Contact Name"),
    (
        "contact_title",
        "Contact's Title",
        "The title of the HIRING MANAGER. Not the title being hired.",
    ),
];

const STYLE: &str = "body{font-family:sans-serif;max-width:760px;margin:2rem auto;padding:0 1rem}\
label{display:block;font-weight:bold;margin-top:1rem}\
textarea,select{width:100%;box-sizing:border-box}\
textarea{min-height:4rem}\
pre{white-space:pre-wrap;background:#f6f6f6;padding:1rem}\
.error{color:#a00;border-left:4px solid #a00;padding-left:.5rem}\
.notice{background:#fff6d5;padding:.5rem 1rem}";

/// Everything the page shows for one render
pub struct PageView<'a> {
    /// Current form values (echoed back into the inputs)
    pub form: &'a OutreachForm,

    /// Result of the last submission, if any
    pub outcome: Option<&'a DraftOutcome>,

    pub generation_enabled: bool,
}

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the full page
pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{}</title><style>{}</style></head><body>\n",
        PAGE_TITLE, STYLE
    );
    let _ = write!(html, "<h1>{}</h1>\n<p>{}</p>\n", HEADER, INTRO);

    if !view.generation_enabled {
        html.push_str(
            "<p class=\"notice\" id=\"generation-disabled\">Email generation is unavailable because \
             no API key is configured (OPENAI_API_KEY). The form still works, but nothing will \
             be generated.</p>\n",
        );
    }

    render_form(&mut html, view.form);

    if let Some(outcome) = view.outcome {
        render_outcome(&mut html, outcome);
    }

    html.push_str("</body></html>\n");
    html
}

fn render_form(html: &mut String, form: &OutreachForm) {
    html.push_str("<h2>Enter Opportunity Details</h2>\n<form method=\"post\" action=\"/\">\n");

    html.push_str("<label for=\"category\">What kind of opportunity is this?</label>\n");
    html.push_str("<select id=\"category\" name=\"category\">");
    for category in Category::ALL {
        let selected = if category == form.category { " selected" } else { "" };
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            category.as_str(),
            selected,
            category.label()
        );
    }
    html.push_str("</select>\n");

    let values = [
        &form.description,
        &form.key_message,
        &form.contact_name,
        &form.contact_title,
    ];
    for ((name, label, placeholder), value) in TEXT_FIELDS.iter().zip(values) {
        let _ = write!(
            html,
            "<label for=\"{name}\">{label}</label>\n\
             <textarea id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\">\n{value}</textarea>\n",
            name = name,
            label = escape_html(label),
            placeholder = escape_html(placeholder),
            value = escape_html(value),
        );
    }

    let checked = if form.include_style_sample { " checked" } else { "" };
    let _ = write!(
        html,
        "<label><input type=\"checkbox\" name=\"include_style_sample\" value=\"on\"{}> \
         Include a starter email as a style reference</label>\n",
        checked
    );

    html.push_str("<p><button type=\"submit\">Submit</button></p>\n</form>\n");
}

fn render_outcome(html: &mut String, outcome: &DraftOutcome) {
    let error = outcome.error.as_ref();

    if let Some(err) = error.filter(|e| e.kind == DraftErrorKind::Configuration) {
        render_error(html, err);
        return;
    }

    html.push_str("<h3>Shortened description</h3>\n");
    render_region(html, "shortened", outcome.shortened.as_deref());
    if let Some(err) = error.filter(|e| e.stage == Some(Stage::Shortening)) {
        render_error(html, err);
        return;
    }

    html.push_str("<h3>Your email</h3>\n");
    render_region(html, "email", outcome.email.as_deref());
    if let Some(err) = error.filter(|e| e.stage == Some(Stage::Composing)) {
        render_error(html, err);
    }
}

fn render_region(html: &mut String, id: &str, text: Option<&str>) {
    if let Some(text) = text {
        let _ = writeln!(html, "<pre id=\"{}\">{}</pre>", id, escape_html(text));
    }
}

fn render_error(html: &mut String, err: &DraftError) {
    let _ = writeln!(
        html,
        "<p class=\"error\" role=\"alert\">{}</p>",
        escape_html(&err.message)
    );
}
