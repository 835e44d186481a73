//! Documentation model: project, classes, member functions and variables.
//!
//! The model owns every node. Nodes are created on first reference
//! (get-or-create) and are never removed, so repeated mentions of the same
//! qualified name (say a header comment and an implementation comment)
//! accumulate attributes on a single node.

use std::collections::BTreeMap;

/// Reserved key for the unlabelled text at the top of a comment block.
pub const IMPLIED_DESCRIPTION: &str = "*Description";

/// Reserved key for the declaration text captured after a comment block.
pub const CAPTURED_PROTOTYPE: &str = "*Prototype";

/// Class name used for global functions and variables.
pub const GLOBAL_CLASS: &str = "";

/// A keyword/value pair attached to a documentation item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub keyword: String,
    pub value: String,
}

impl Attribute {
    pub fn new(keyword: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            value: value.into(),
        }
    }
}

/// Which kind of node an item is. Members remember their owning class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Project,
    Class,
    Function { class: String },
    Variable { class: String },
}

/// One documentation node.
#[derive(Debug, Clone)]
pub struct DocItem {
    kind: ItemKind,
    name: String,
    link_name: String,
    attributes: Vec<Attribute>,
}

impl DocItem {
    fn new(kind: ItemKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            link_name: name.to_string(),
            attributes: Vec::new(),
        }
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link_name(&self) -> &str {
        &self.link_name
    }

    /// Name shown in page headings, qualified with the owning class.
    pub fn full_display_name(&self) -> String {
        match &self.kind {
            ItemKind::Project => format!("Project {}", self.name),
            ItemKind::Class => self.name.clone(),
            ItemKind::Function { class } => format!("{}::{}()", class, self.name),
            ItemKind::Variable { class } => format!("{}::{}", class, self.name),
        }
    }

    /// Name shown in index tables.
    pub fn display_name(&self) -> String {
        match &self.kind {
            ItemKind::Function { .. } => format!("{}()", self.name),
            ItemKind::Project | ItemKind::Class | ItemKind::Variable { .. } => self.name.clone(),
        }
    }

    /// Functions and variables pick up the declaration that follows their
    /// comment unless they were given an explicit `Prototype:` attribute.
    pub fn needs_prototype(&self) -> bool {
        match self.kind {
            ItemKind::Function { .. } | ItemKind::Variable { .. } => {
                self.find("Prototype").next().is_none()
            }
            ItemKind::Project | ItemKind::Class => false,
        }
    }

    /// Descriptive title: the `Title` attribute if present, otherwise the
    /// first sentence (through the first `.`) of the first attribute.
    pub fn title(&self) -> String {
        if let Some(title) = self.find("Title").next() {
            return title.value.clone();
        }
        let Some(first) = self.attributes.first() else {
            return String::new();
        };
        match first.value.find('.') {
            Some(idx) => first.value[..=idx].to_string(),
            None => first.value.clone(),
        }
    }

    /// All attributes stored under `keyword` (case-insensitive), in
    /// insertion order.
    pub fn find<'a>(&'a self, keyword: &'a str) -> Matches<'a> {
        Matches {
            inner: self.attributes.iter(),
            keyword,
        }
    }

    /// Every attribute in insertion order.
    pub fn attributes(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    pub fn add_attribute(&mut self, keyword: impl Into<String>, value: impl Into<String>) {
        self.attributes.push(Attribute::new(keyword, value));
    }

    pub fn set_implied_description(&mut self, value: impl Into<String>) {
        self.add_attribute(IMPLIED_DESCRIPTION, value);
    }

    pub fn set_default_implied_description(&mut self) {
        self.add_attribute(IMPLIED_DESCRIPTION, "");
    }

    pub fn set_prototype(&mut self, value: impl Into<String>) {
        self.add_attribute(CAPTURED_PROTOTYPE, value);
    }

    /// An empty prototype still marks the item as documented.
    pub fn set_default_prototype(&mut self) {
        self.add_attribute(CAPTURED_PROTOTYPE, "");
    }

    pub fn set_link_name(&mut self, link_name: impl Into<String>) {
        self.link_name = link_name.into();
    }

    pub fn set_default_link_name(&mut self) {
        self.link_name = self.name.clone();
    }
}

/// Lazy, restartable iterator over the attributes matching one keyword.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    inner: std::slice::Iter<'a, Attribute>,
    keyword: &'a str,
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a Attribute;

    fn next(&mut self) -> Option<Self::Item> {
        let keyword = self.keyword;
        self.inner
            .by_ref()
            .find(|attr| attr.keyword.eq_ignore_ascii_case(keyword))
    }
}

/// A class node together with its members.
#[derive(Debug, Clone)]
pub struct DocClass {
    item: DocItem,
    functions: BTreeMap<String, DocItem>,
    variables: BTreeMap<String, DocItem>,
}

impl DocClass {
    fn new(name: &str) -> Self {
        Self {
            item: DocItem::new(ItemKind::Class, name),
            functions: BTreeMap::new(),
            variables: BTreeMap::new(),
        }
    }

    pub fn item(&self) -> &DocItem {
        &self.item
    }

    pub fn name(&self) -> &str {
        self.item.name()
    }

    pub fn is_global(&self) -> bool {
        self.item.name() == GLOBAL_CLASS
    }

    /// Member functions sorted by name.
    pub fn functions(&self) -> impl Iterator<Item = &DocItem> {
        self.functions.values()
    }

    /// Member variables sorted by name.
    pub fn variables(&self) -> impl Iterator<Item = &DocItem> {
        self.variables.values()
    }

    pub fn function(&self, name: &str) -> Option<&DocItem> {
        self.functions.get(name)
    }

    pub fn variable(&self, name: &str) -> Option<&DocItem> {
        self.variables.get(name)
    }

    fn function_mut(&mut self, name: &str) -> &mut DocItem {
        let class = self.item.name().to_string();
        self.functions
            .entry(name.to_string())
            .or_insert_with(|| DocItem::new(ItemKind::Function { class }, name))
    }

    fn variable_mut(&mut self, name: &str) -> &mut DocItem {
        let class = self.item.name().to_string();
        self.variables
            .entry(name.to_string())
            .or_insert_with(|| DocItem::new(ItemKind::Variable { class }, name))
    }
}

/// Non-owning handle to a node of a [`DocumentModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRef {
    Project,
    Class(String),
    Function { class: String, name: String },
    Variable { class: String, name: String },
}

/// The project node and everything it owns.
#[derive(Debug, Clone)]
pub struct DocumentModel {
    project: DocItem,
    classes: BTreeMap<String, DocClass>,
}

impl Default for DocumentModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentModel {
    pub fn new() -> Self {
        Self {
            project: DocItem::new(ItemKind::Project, ""),
            classes: BTreeMap::new(),
        }
    }

    pub fn project(&self) -> &DocItem {
        &self.project
    }

    /// Names the project. The link name follows unless overridden later.
    pub fn set_project_name(&mut self, name: &str) -> ItemRef {
        self.project.name = name.to_string();
        ItemRef::Project
    }

    pub fn get_class(&mut self, name: &str) -> ItemRef {
        self.class_mut(name);
        ItemRef::Class(name.to_string())
    }

    pub fn get_function(&mut self, class: &str, name: &str) -> ItemRef {
        self.class_mut(class).function_mut(name);
        ItemRef::Function {
            class: class.to_string(),
            name: name.to_string(),
        }
    }

    pub fn get_variable(&mut self, class: &str, name: &str) -> ItemRef {
        self.class_mut(class).variable_mut(name);
        ItemRef::Variable {
            class: class.to_string(),
            name: name.to_string(),
        }
    }

    /// Resolves a handle. Handles handed out by this model always resolve.
    pub fn item(&self, handle: &ItemRef) -> Option<&DocItem> {
        match handle {
            ItemRef::Project => Some(&self.project),
            ItemRef::Class(name) => self.classes.get(name).map(DocClass::item),
            ItemRef::Function { class, name } => self.classes.get(class)?.function(name),
            ItemRef::Variable { class, name } => self.classes.get(class)?.variable(name),
        }
    }

    /// Resolves a handle for mutation, creating the node if it is missing.
    pub fn item_mut(&mut self, handle: &ItemRef) -> &mut DocItem {
        match handle {
            ItemRef::Project => &mut self.project,
            ItemRef::Class(name) => &mut self.class_mut(name).item,
            ItemRef::Function { class, name } => self.class_mut(class).function_mut(name),
            ItemRef::Variable { class, name } => self.class_mut(class).variable_mut(name),
        }
    }

    /// Every class sorted by name, the global pseudo-class (if any) first.
    pub fn classes(&self) -> impl Iterator<Item = &DocClass> {
        self.classes.values()
    }

    pub fn class(&self, name: &str) -> Option<&DocClass> {
        self.classes.get(name)
    }

    pub fn global_class(&self) -> Option<&DocClass> {
        self.classes.get(GLOBAL_CLASS)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn class_mut(&mut self, name: &str) -> &mut DocClass {
        self.classes
            .entry(name.to_string())
            .or_insert_with(|| DocClass::new(name))
    }
}
