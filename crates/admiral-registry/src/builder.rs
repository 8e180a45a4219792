//! Configuration DSL handed to configuration blocks
//!
//! ```ignore
//! admin.model_with("Team", |m| {
//!     m.weight(-1).label("Squad");
//!     m.list(|s| {
//!         s.field("name", |f| {
//!             f.searchable(true);
//!         });
//!         s.exclude_fields(["revenue"]);
//!     });
//! })?;
//! ```

use crate::declaration::{FieldDeclaration, ModelDeclaration, SectionDeclaration};
use crate::rule::Rule;
use crate::section::Section;
use admiral_core::{BoxError, Bindings};

/// Model-level configuration
pub struct ModelBuilder<'a> {
    declaration: &'a mut ModelDeclaration,
}

impl<'a> ModelBuilder<'a> {
    pub(crate) fn new(declaration: &'a mut ModelDeclaration) -> Self {
        Self { declaration }
    }

    /// Fixed model label
    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.declaration.label = Some(Rule::Value(label.into()));
        self
    }

    /// Model label computed per request
    pub fn label_with<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Bindings) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.declaration.label = Some(Rule::computed(f));
        self
    }

    pub fn label_plural(&mut self, label: impl Into<String>) -> &mut Self {
        self.declaration.label_plural = Some(Rule::Value(label.into()));
        self
    }

    /// Navigation weight; lower sorts first
    pub fn weight(&mut self, weight: i32) -> &mut Self {
        self.declaration.weight = Some(Rule::Value(weight));
        self
    }

    pub fn weight_with<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Bindings) -> Result<i32, BoxError> + Send + Sync + 'static,
    {
        self.declaration.weight = Some(Rule::computed(f));
        self
    }

    pub fn visible(&mut self, visible: bool) -> &mut Self {
        self.declaration.visible = Some(Rule::Value(visible));
        self
    }

    /// Visibility decided per request
    pub fn visible_if<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Bindings) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.declaration.visible = Some(Rule::computed(f));
        self
    }

    pub fn hide(&mut self) -> &mut Self {
        self.visible(false)
    }

    pub fn show(&mut self) -> &mut Self {
        self.visible(true)
    }

    /// Group heading the model is listed under in navigation
    pub fn navigation_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.declaration.navigation_label = Some(label.into());
        self
    }

    /// Attribute used to label records of this model
    pub fn object_label_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.declaration.object_label_method = Some(method.into());
        self
    }

    pub fn items_per_page(&mut self, items: u32) -> &mut Self {
        self.declaration.items_per_page = Some(items);
        self
    }

    pub fn associated_collection_limit(&mut self, limit: u32) -> &mut Self {
        self.declaration.associated_collection_limit = Some(limit);
        self
    }

    /// Declare a field in the base section, replacing any prior declaration
    pub fn field<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut FieldBuilder<'_>),
    {
        self.section(Section::Base, |s| {
            s.field(name, f);
        })
    }

    /// Adjust a field in the base section without listing it
    pub fn configure<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut FieldBuilder<'_>),
    {
        self.section(Section::Base, |s| {
            s.configure(name, f);
        })
    }

    /// Declare several plain fields in the base section
    pub fn include_fields<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.section(Section::Base, |s| {
            s.include_fields(names);
        })
    }

    pub fn exclude_fields<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.section(Section::Base, |s| {
            s.exclude_fields(names);
        })
    }

    /// Configure one section
    pub fn section<F>(&mut self, section: Section, f: F) -> &mut Self
    where
        F: FnOnce(&mut SectionBuilder<'_>),
    {
        let mut builder = SectionBuilder {
            declaration: self.declaration.section_mut(section),
        };
        f(&mut builder);
        self
    }

    pub fn list<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut SectionBuilder<'_>),
    {
        self.section(Section::List, f)
    }

    pub fn show_section<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut SectionBuilder<'_>),
    {
        self.section(Section::Show, f)
    }

    pub fn edit<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut SectionBuilder<'_>),
    {
        self.section(Section::Edit, f)
    }

    pub fn export<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut SectionBuilder<'_>),
    {
        self.section(Section::Export, f)
    }
}

/// Field declarations of one section
pub struct SectionBuilder<'a> {
    declaration: &'a mut SectionDeclaration,
}

impl SectionBuilder<'_> {
    /// Declare a field, replacing any prior declaration of the same name
    ///
    /// The field keeps its original position.
    pub fn field<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut FieldBuilder<'_>),
    {
        let mut declaration = FieldDeclaration {
            included: true,
            ..Default::default()
        };
        f(&mut FieldBuilder {
            declaration: &mut declaration,
        });
        self.declaration.fields.insert(name.to_string(), declaration);
        self
    }

    /// Adjust a field without listing it; options set here overlay earlier ones
    pub fn configure<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut FieldBuilder<'_>),
    {
        let declaration = self.declaration.fields.entry(name.to_string()).or_default();
        f(&mut FieldBuilder { declaration });
        self
    }

    /// Declare several plain fields
    pub fn include_fields<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.declaration
                .fields
                .entry(name.as_ref().to_string())
                .or_default()
                .included = true;
        }
        self
    }

    /// Drop fields from this section and the sections inheriting from it
    pub fn exclude_fields<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref().to_string();
            if !self.declaration.excluded.contains(&name) {
                self.declaration.excluded.push(name);
            }
        }
        self
    }
}

/// Options of one field
pub struct FieldBuilder<'a> {
    declaration: &'a mut FieldDeclaration,
}

impl FieldBuilder<'_> {
    /// Field type tag; must be registered when fields are materialized
    pub fn field_type(&mut self, tag: impl Into<String>) -> &mut Self {
        self.declaration.field_type = Some(tag.into());
        self
    }

    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.declaration.label = Some(Rule::Value(label.into()));
        self
    }

    pub fn label_with<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Bindings) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.declaration.label = Some(Rule::computed(f));
        self
    }

    pub fn help(&mut self, help: impl Into<String>) -> &mut Self {
        self.declaration.help = Some(help.into());
        self
    }

    pub fn visible(&mut self, visible: bool) -> &mut Self {
        self.declaration.visible = Some(Rule::Value(visible));
        self
    }

    pub fn visible_if<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Bindings) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.declaration.visible = Some(Rule::computed(f));
        self
    }

    pub fn hide(&mut self) -> &mut Self {
        self.visible(false)
    }

    pub fn read_only(&mut self, read_only: bool) -> &mut Self {
        self.declaration.read_only = Some(read_only);
        self
    }

    pub fn required(&mut self, required: bool) -> &mut Self {
        self.declaration.required = Some(required);
        self
    }

    pub fn searchable(&mut self, searchable: bool) -> &mut Self {
        self.declaration.searchable = Some(searchable);
        self
    }

    pub fn sortable(&mut self, sortable: bool) -> &mut Self {
        self.declaration.sortable = Some(sortable);
        self
    }
}
