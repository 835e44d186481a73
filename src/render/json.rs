//! JSON renderer: structured output for tooling integration.
//!
//! Serializes the whole model into a single `index.json`, one entry per
//! node with its derived names and title next to the raw attributes.

use crate::model::*;
use crate::render::{Page, Renderer};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct ProjectJson<'a> {
    project: ItemJson<'a>,
    classes: Vec<ClassJson<'a>>,
}

#[derive(Serialize)]
struct ClassJson<'a> {
    #[serde(flatten)]
    item: ItemJson<'a>,
    global: bool,
    functions: Vec<ItemJson<'a>>,
    variables: Vec<ItemJson<'a>>,
}

#[derive(Serialize)]
struct ItemJson<'a> {
    name: &'a str,
    full_name: String,
    display_name: String,
    link_name: &'a str,
    title: String,
    attributes: Vec<AttributeJson<'a>>,
}

#[derive(Serialize)]
struct AttributeJson<'a> {
    keyword: &'a str,
    value: &'a str,
}

impl<'a> From<&'a DocItem> for ItemJson<'a> {
    fn from(item: &'a DocItem) -> Self {
        Self {
            name: item.name(),
            full_name: item.full_display_name(),
            display_name: item.display_name(),
            link_name: item.link_name(),
            title: item.title(),
            attributes: item
                .attributes()
                .map(|a| AttributeJson {
                    keyword: &a.keyword,
                    value: &a.value,
                })
                .collect(),
        }
    }
}

impl<'a> From<&'a DocClass> for ClassJson<'a> {
    fn from(class: &'a DocClass) -> Self {
        Self {
            item: class.item().into(),
            global: class.is_global(),
            functions: class.functions().map(ItemJson::from).collect(),
            variables: class.variables().map(ItemJson::from).collect(),
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, model: &DocumentModel) -> Vec<Page> {
        let doc = ProjectJson {
            project: model.project().into(),
            classes: model.classes().map(ClassJson::from).collect(),
        };
        // Plain strings and vectors only, serialization cannot fail
        let mut contents = serde_json::to_string_pretty(&doc).unwrap_or_default();
        contents.push('\n');
        vec![Page {
            file_name: "index.json".to_string(),
            contents,
        }]
    }

    fn name(&self) -> &str {
        "json"
    }
}
