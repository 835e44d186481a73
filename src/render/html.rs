//! HTML renderer: `index.html` for the project and globals, one page per
//! class.

use crate::model::*;
use crate::render::format::{anchor, class_file_name, escape, smart_format};
use crate::render::{Page, Renderer};
use std::collections::HashSet;

/// File name of the project page.
const INDEX_PAGE: &str = "index.html";

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, model: &DocumentModel) -> Vec<Page> {
        let class_pages = class_page_names(model);
        let mut pages = vec![Page {
            file_name: INDEX_PAGE.to_string(),
            contents: render_project_page(model, &class_pages),
        }];

        for (class, file_name) in class_pages {
            pages.push(Page {
                file_name,
                contents: render_class_page(class),
            });
        }
        pages
    }

    fn name(&self) -> &str {
        "html"
    }
}

fn prolog(title: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"generator\" content=\"docgen\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(title)));
    out.push_str("<style>\n");
    out.push_str("body { font-family: system-ui, sans-serif; max-width: 52em; margin: 2em auto; padding: 0 1em; }\n");
    out.push_str(".prototype { font-style: italic; font-family: monospace; white-space: pre-wrap; }\n");
    out.push_str("td { vertical-align: top; padding: 0.2em 1em 0.2em 0; }\n");
    out.push_str("dt { font-weight: bold; margin-top: 0.5em; }\n");
    out.push_str("dd { margin-left: 1.5em; }\n");
    out.push_str("</style>\n");
    out.push_str("</head>\n<body>\n");
    out
}

const EPILOG: &str = "</body>\n</html>\n";

/// Assigns a page to every named class, in class order. Globals are already
/// on the index page.
///
/// Names are unique ignoring case and never equal the index page; a clash
/// gets a numeric suffix (`index_2.html`, `foo_2.html`).
fn class_page_names(model: &DocumentModel) -> Vec<(&DocClass, String)> {
    let mut taken = HashSet::from([INDEX_PAGE.to_string()]);
    let mut names = Vec::new();
    for class in model.classes().filter(|c| !c.is_global()) {
        let mut file_name = class_file_name(class.name());
        let mut n = 2;
        while !taken.insert(file_name.to_lowercase()) {
            file_name = format!("{}_{}.html", anchor(class.name()), n);
            n += 1;
        }
        if n > 2 {
            tracing::debug!(class = class.name(), file = %file_name, "renamed clashing class page");
        }
        names.push((class, file_name));
    }
    names
}

fn render_project_page(model: &DocumentModel, class_pages: &[(&DocClass, String)]) -> String {
    let project = model.project();
    let full_name = project.full_display_name();
    let mut out = prolog(&full_name);

    out.push_str(&render_item(project));

    // Class index
    if !class_pages.is_empty() {
        out.push_str(&format!("<h3>{} classes</h3>\n", escape(&full_name)));
        out.push_str("<table>\n");
        for (class, file_name) in class_pages {
            out.push_str(&index_row(
                file_name,
                &class.item().display_name(),
                &class.item().title(),
            ));
        }
        out.push_str("</table>\n");
    }
    out.push_str("<hr>\n");

    out.push_str(&format!("<h3>{} globals</h3>\n", escape(&full_name)));
    match model.global_class() {
        Some(globals) => out.push_str(&render_members(globals)),
        None => out.push_str("<p><b>No Global functions or variables</b></p>\n"),
    }

    out.push_str(EPILOG);
    out
}

fn render_class_page(class: &DocClass) -> String {
    let mut out = prolog(&class.item().full_display_name());
    out.push_str(&render_item(class.item()));
    out.push_str(&render_members(class));
    out.push_str(EPILOG);
    out
}

/// Member indexes followed by every member in detail.
fn render_members(class: &DocClass) -> String {
    let mut out = String::new();
    let (functions_heading, variables_heading) = if class.is_global() {
        ("Global functions".to_string(), "Global variables".to_string())
    } else {
        let name = class.item().full_display_name();
        (
            format!("{} member functions", name),
            format!("{} member variables", name),
        )
    };

    out.push_str(&member_index(&functions_heading, class.functions()));
    out.push_str(&member_index(&variables_heading, class.variables()));

    out.push_str("<hr>\n");
    for item in class.functions().chain(class.variables()) {
        out.push_str(&render_item(item));
        out.push_str("<hr>\n");
    }
    out
}

fn member_index<'a>(heading: &str, members: impl Iterator<Item = &'a DocItem>) -> String {
    let mut out = String::new();
    let mut members = members.peekable();
    if members.peek().is_none() {
        return out;
    }

    out.push_str(&format!("<h3>{}</h3>\n", escape(heading)));
    out.push_str("<table>\n");
    for item in members {
        out.push_str(&index_row(
            &format!("#{}", anchor(item.link_name())),
            &item.display_name(),
            &item.title(),
        ));
    }
    out.push_str("</table>\n");
    out
}

fn index_row(href: &str, label: &str, title: &str) -> String {
    format!(
        "  <tr><td><a href=\"{}\">{}</a></td><td>{}</td></tr>\n",
        escape(href),
        escape(label),
        title
    )
}

/// Generic output of one item: heading, prototypes, descriptions, then
/// every other attribute in the order it was written.
fn render_item(item: &DocItem) -> String {
    let mut out = String::new();

    out.push_str(&format!("<a name=\"{}\"></a>\n", escape(&anchor(item.link_name()))));
    out.push_str(&format!("<h1>{}</h1>\n", escape(&item.full_display_name())));

    for key in [CAPTURED_PROTOTYPE, "Prototype"] {
        for attr in item.find(key).filter(|a| !a.value.is_empty()) {
            out.push_str(&format!("<p class=\"prototype\">{}</p>\n", escape(&attr.value)));
        }
    }

    for key in [IMPLIED_DESCRIPTION, "Description"] {
        for attr in item.find(key).filter(|a| !a.value.is_empty()) {
            out.push_str(&format!("<p>{}</p>\n", smart_format(&attr.value)));
        }
    }

    let others: Vec<&Attribute> = item
        .attributes()
        .filter(|a| !is_headline_key(&a.keyword))
        .collect();
    if !others.is_empty() {
        out.push_str("<dl>\n");
        for attr in others {
            out.push_str(&format!("  <dt>{}:</dt>\n", escape(&attr.keyword)));
            out.push_str(&format!("  <dd>{}</dd>\n", smart_format(&attr.value)));
        }
        out.push_str("</dl>\n");
    }

    out
}

/// Keys rendered above the definition list.
fn is_headline_key(keyword: &str) -> bool {
    [CAPTURED_PROTOTYPE, "Prototype", IMPLIED_DESCRIPTION, "Description"]
        .iter()
        .any(|k| k.eq_ignore_ascii_case(keyword))
}
