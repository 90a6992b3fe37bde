//! Model entities and the already-extracted models they live in
//!
//! Architecture and code models are produced by extraction stages outside
//! this workspace. The endpoint kinds are closed enums so scorers can match
//! on them exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::split_name_parts;

/// Stable identifier of a model entity
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    /// Create an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Which model a set of entities and links belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metamodel {
    /// Architecture model (components, interfaces)
    Architecture,
    /// Code model (compilation units, packages)
    Code,
}

impl Metamodel {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Metamodel::Architecture => "architecture",
            Metamodel::Code => "code",
        }
    }
}

impl fmt::Display for Metamodel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity, name and type information shared by every model element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelEntity {
    /// Stable identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// Type tag (e.g. "BasicComponent"), if the model provides one
    pub entity_type: Option<String>,

    /// Parts of the compound name
    pub name_parts: Vec<String>,

    /// Parts of the compound type tag
    pub type_parts: Vec<String>,
}

impl ModelEntity {
    /// Create an untyped entity
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            name_parts: split_name_parts(&name),
            name,
            entity_type: None,
            type_parts: Vec::new(),
        }
    }

    /// Set the type tag
    pub fn with_type(mut self, entity_type: impl Into<String>) -> Self {
        let entity_type = entity_type.into();
        self.type_parts = split_name_parts(&entity_type);
        self.entity_type = Some(entity_type);
        self
    }

    /// An entity is usable for scoring when both id and name are non-blank
    pub fn is_well_formed(&self) -> bool {
        !self.id.as_str().trim().is_empty() && !self.name.trim().is_empty()
    }
}

/// Architecture component
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchitectureComponent {
    /// Entity data; typed "Component" unless overridden
    pub entity: ModelEntity,
}

impl ArchitectureComponent {
    /// Create a component of type "Component"
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            entity: ModelEntity::new(id, name).with_type("Component"),
        }
    }
}

/// Architecture interface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchitectureInterface {
    /// Entity data; typed "Interface" unless overridden
    pub entity: ModelEntity,

    /// Declared method signatures
    pub method_signatures: Vec<String>,
}

impl ArchitectureInterface {
    /// Create an interface of type "Interface" without signatures
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            entity: ModelEntity::new(id, name).with_type("Interface"),
            method_signatures: Vec::new(),
        }
    }

    /// Attach method signatures
    pub fn with_signatures(mut self, signatures: Vec<String>) -> Self {
        self.method_signatures = signatures;
        self
    }
}

/// Element of an architecture model
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArchitectureItem {
    /// A component
    Component(ArchitectureComponent),
    /// An interface
    Interface(ArchitectureInterface),
}

impl ArchitectureItem {
    /// Shared entity data
    pub fn entity(&self) -> &ModelEntity {
        match self {
            ArchitectureItem::Component(c) => &c.entity,
            ArchitectureItem::Interface(i) => &i.entity,
        }
    }

    /// Entity id
    pub fn id(&self) -> &EntityId {
        &self.entity().id
    }
}

impl From<ArchitectureComponent> for ArchitectureItem {
    fn from(component: ArchitectureComponent) -> Self {
        ArchitectureItem::Component(component)
    }
}

impl From<ArchitectureInterface> for ArchitectureItem {
    fn from(interface: ArchitectureInterface) -> Self {
        ArchitectureItem::Interface(interface)
    }
}

/// Compilation unit (source file) of a code model
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeCompilationUnit {
    /// Entity data; typed "CompilationUnit"
    pub entity: ModelEntity,

    /// Enclosing package names, outermost first; empty for the default package
    pub parent_package_names: Vec<String>,
}

impl CodeCompilationUnit {
    /// Create a compilation unit inside the given package chain
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, packages: Vec<String>) -> Self {
        Self {
            entity: ModelEntity::new(id, name).with_type("CompilationUnit"),
            parent_package_names: packages,
        }
    }

    /// Whether the unit lives in a named package
    pub fn has_parent(&self) -> bool {
        !self.parent_package_names.is_empty()
    }
}

/// Package of a code model
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodePackage {
    /// Entity data; typed "Package"
    pub entity: ModelEntity,
}

impl CodePackage {
    /// Create a package
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            entity: ModelEntity::new(id, name).with_type("Package"),
        }
    }
}

/// Element of a code model
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodeItem {
    /// A compilation unit
    CompilationUnit(CodeCompilationUnit),
    /// A package
    Package(CodePackage),
}

impl CodeItem {
    /// Shared entity data
    pub fn entity(&self) -> &ModelEntity {
        match self {
            CodeItem::CompilationUnit(u) => &u.entity,
            CodeItem::Package(p) => &p.entity,
        }
    }
}

impl From<CodeCompilationUnit> for CodeItem {
    fn from(unit: CodeCompilationUnit) -> Self {
        CodeItem::CompilationUnit(unit)
    }
}

impl From<CodePackage> for CodeItem {
    fn from(package: CodePackage) -> Self {
        CodeItem::Package(package)
    }
}

/// Extracted architecture model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchitectureModel {
    /// Items in extraction order
    pub items: Vec<ArchitectureItem>,
}

impl ArchitectureModel {
    /// Create a model from its items
    pub fn new(items: Vec<ArchitectureItem>) -> Self {
        Self { items }
    }

    /// Entity data of every item
    pub fn entities(&self) -> impl Iterator<Item = &ModelEntity> + '_ {
        self.items.iter().map(ArchitectureItem::entity)
    }
}

/// Extracted code model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeModel {
    /// Items in extraction order
    pub items: Vec<CodeItem>,
}

impl CodeModel {
    /// Create a model from its items
    pub fn new(items: Vec<CodeItem>) -> Self {
        Self { items }
    }

    /// Compilation units only
    pub fn compilation_units(&self) -> impl Iterator<Item = &CodeCompilationUnit> + '_ {
        self.items.iter().filter_map(|item| match item {
            CodeItem::CompilationUnit(unit) => Some(unit),
            CodeItem::Package(_) => None,
        })
    }

    /// Entity data of every item
    pub fn entities(&self) -> impl Iterator<Item = &ModelEntity> + '_ {
        self.items.iter().map(CodeItem::entity)
    }
}
