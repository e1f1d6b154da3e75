//! Resolved declaration model
//!
//! Declarations are produced by the resolution stage and stored in a single
//! arena owned by [`ResolvedModule`]. Children (members, parameters, local
//! declarations) are referenced by [`DeclId`], so the renderer and checkers can
//! walk the tree read-only while looking up any other declaration through the
//! [`ResolutionSession`].

pub mod builder;
pub mod builtins;
pub mod module;
pub mod status;
pub mod visitor;

use la_arena::Idx;
use ql_intern::Symbol;
use ql_span::SourceLocation;
use ql_ty::{ClassId, TypeShape, Variance};

pub use builder::{
    AccessorConfig, ClassConfig, ConstructorConfig, Container, FunctionConfig, ModuleBuilder,
    PropertyConfig, TypeAliasConfig, TypeParameterConfig, ValueParameterConfig, modifiers,
};
pub use module::{DeclarationScope, ResolutionSession, ResolvedModule};
pub use status::{DeclarationStatus, Modality, Modifier, Modifiers, Visibility};
pub use visitor::DeclarationVisitor;

/// Declaration node ID
pub type DeclId = Idx<Declaration>;

/// A resolved declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// Class, interface, object, enum or annotation class
    RegularClass(RegularClass),
    /// `object : ...` expression
    AnonymousObject(AnonymousObject),
    /// Named function
    SimpleFunction(SimpleFunction),
    /// Member, top-level or local property
    Property(Property),
    /// Property getter or setter
    PropertyAccessor(PropertyAccessor),
    /// Primary or secondary constructor
    Constructor(Constructor),
    /// `typealias`
    TypeAlias(TypeAlias),
    /// Type parameter of a class, callable or alias
    TypeParameter(TypeParameter),
    /// Value parameter of a callable
    ValueParameter(ValueParameter),
    /// Entry of an enum class
    EnumEntry(EnumEntry),
}

/// Class kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassKind {
    /// `class`
    #[default]
    Class,
    /// `interface`
    Interface,
    /// `enum class`
    EnumClass,
    /// Class body of an enum entry
    EnumEntry,
    /// `object`
    Object,
    /// `annotation class`
    AnnotationClass,
}

impl ClassKind {
    /// Objects and enum entries have a single instance
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Object | Self::EnumEntry)
    }

    /// Keyword introducing the declaration
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::EnumClass => "enum class",
            Self::EnumEntry => "enum entry",
            Self::Object => "object",
            Self::AnnotationClass => "annotation class",
        }
    }
}

/// Explicit use-site target of an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationUseSite {
    /// `@receiver:`
    Receiver,
    /// `@field:`
    Field,
    /// `@get:`
    Get,
    /// `@set:`
    Set,
    /// `@param:`
    Param,
}

impl AnnotationUseSite {
    /// Target name as written before the colon
    pub fn label(self) -> &'static str {
        match self {
            Self::Receiver => "receiver",
            Self::Field => "field",
            Self::Get => "get",
            Self::Set => "set",
            Self::Param => "param",
        }
    }
}

/// Annotation application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Annotation class
    pub class_id: ClassId,
    /// Argument expressions, already rendered
    pub arguments: Vec<String>,
    /// Explicit use-site target
    pub use_site: Option<AnnotationUseSite>,
}

/// Resolved type reference as written at a declaration site
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    /// Resolved type
    pub ty: TypeShape,
    /// Type annotations written before the type
    pub annotations: Vec<Annotation>,
    /// Location of the reference
    pub source: SourceLocation,
}

impl TypeRef {
    /// Unannotated reference without source syntax
    pub fn new(ty: TypeShape) -> Self {
        Self {
            ty,
            annotations: Vec::new(),
            source: SourceLocation::synthetic(),
        }
    }

    /// Reference carrying type annotations
    #[must_use]
    pub fn annotated(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }
}

impl From<TypeShape> for TypeRef {
    fn from(ty: TypeShape) -> Self {
        Self::new(ty)
    }
}

/// Statement of a callable body
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Local declaration
    Declaration(DeclId),
    /// Expression whose content is irrelevant to rendering and checking
    Expression {
        /// Location of the expression
        source: SourceLocation,
    },
    /// Nested block
    Block(Block),
}

/// Block of statements
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// Statements in source order
    pub statements: Vec<Statement>,
}

/// Class, interface, object, enum class, enum entry body or annotation class
#[derive(Debug, Clone, PartialEq)]
pub struct RegularClass {
    /// Simple name
    pub name: Symbol,
    /// Fully qualified id
    pub class_id: ClassId,
    /// Location of the declaration
    pub source: SourceLocation,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// Visibility, modality and modifiers
    pub status: DeclarationStatus,
    /// Kind tag
    pub kind: ClassKind,
    /// Whether this is a companion object
    pub is_companion: bool,
    /// Type parameters in declaration order
    pub type_parameters: Vec<DeclId>,
    /// Direct supertypes in declaration order
    pub supertypes: Vec<TypeRef>,
    /// Member declarations in declaration order
    pub members: Vec<DeclId>,
}

impl RegularClass {
    /// Whether this is an interface
    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// Whether the class is declared with the `inner` modifier
    pub fn is_inner(&self) -> bool {
        self.status.has(Modifier::Inner)
    }
}

/// Anonymous object
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousObject {
    /// Local id of the object's class
    pub class_id: ClassId,
    /// Location of the expression
    pub source: SourceLocation,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// Direct supertypes
    pub supertypes: Vec<TypeRef>,
    /// Member declarations
    pub members: Vec<DeclId>,
}

/// Named function
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleFunction {
    /// Function name
    pub name: Symbol,
    /// Location of the declaration
    pub source: SourceLocation,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// Visibility, modality and modifiers
    pub status: DeclarationStatus,
    /// Type parameters
    pub type_parameters: Vec<DeclId>,
    /// Extension receiver
    pub receiver: Option<TypeRef>,
    /// Value parameters
    pub value_parameters: Vec<DeclId>,
    /// Declared or inferred return type
    pub return_type: TypeRef,
    /// Body, absent for abstract and external functions
    pub body: Option<Block>,
}

/// Property
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name
    pub name: Symbol,
    /// Location of the declaration
    pub source: SourceLocation,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// Visibility, modality and modifiers
    pub status: DeclarationStatus,
    /// `var` rather than `val`
    pub is_var: bool,
    /// Type parameters of an extension property
    pub type_parameters: Vec<DeclId>,
    /// Extension receiver
    pub receiver: Option<TypeRef>,
    /// Declared or inferred type
    pub return_type: TypeRef,
    /// Getter
    pub getter: Option<DeclId>,
    /// Setter
    pub setter: Option<DeclId>,
}

/// Getter or setter
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAccessor {
    /// `get` rather than `set`
    pub is_getter: bool,
    /// Location of the accessor
    pub source: SourceLocation,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// Visibility, modality and modifiers
    pub status: DeclarationStatus,
    /// Setter parameter
    pub value_parameters: Vec<DeclId>,
    /// Property type for getters, `Unit` for setters
    pub return_type: TypeRef,
    /// Body
    pub body: Option<Block>,
}

/// Constructor
#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    /// Location of the declaration
    pub source: SourceLocation,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// Visibility and modifiers
    pub status: DeclarationStatus,
    /// Primary constructor declared in the class header
    pub is_primary: bool,
    /// Type parameters of the constructed class
    pub type_parameters: Vec<DeclId>,
    /// Value parameters
    pub value_parameters: Vec<DeclId>,
    /// Constructed type
    pub return_type: TypeRef,
    /// Body of a secondary constructor
    pub body: Option<Block>,
}

/// Type alias
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    /// Alias name
    pub name: Symbol,
    /// Fully qualified id
    pub class_id: ClassId,
    /// Location of the declaration
    pub source: SourceLocation,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// Visibility and modifiers
    pub status: DeclarationStatus,
    /// Type parameters
    pub type_parameters: Vec<DeclId>,
    /// Right-hand side
    pub expanded: TypeRef,
}

/// Type parameter
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    /// Parameter name
    pub name: Symbol,
    /// Location of the parameter
    pub source: SourceLocation,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// Declaration-site variance
    pub variance: Variance,
    /// `reified`
    pub is_reified: bool,
    /// Upper bounds; empty means the implicit `Any?`
    pub bounds: Vec<TypeRef>,
}

/// Value parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ValueParameter {
    /// Parameter name
    pub name: Symbol,
    /// Location of the parameter
    pub source: SourceLocation,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// `vararg`, `crossinline` and `noinline`
    pub modifiers: Modifiers,
    /// Declared as `var` in a primary constructor
    pub is_var: bool,
    /// Parameter type
    pub return_type: TypeRef,
    /// Whether a default value expression is declared
    pub has_default_value: bool,
}

/// Enum entry
#[derive(Debug, Clone, PartialEq)]
pub struct EnumEntry {
    /// Entry name
    pub name: Symbol,
    /// Location of the entry
    pub source: SourceLocation,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// Visibility and modifiers
    pub status: DeclarationStatus,
    /// Type of the enum class
    pub return_type: TypeRef,
    /// Class body of the entry, if it declares one
    pub initializer: Option<DeclId>,
}

impl Declaration {
    /// Declared name; anonymous objects, accessors and constructors have none
    pub fn name(&self) -> Option<Symbol> {
        match self {
            Self::RegularClass(class) => Some(class.name),
            Self::SimpleFunction(function) => Some(function.name),
            Self::Property(property) => Some(property.name),
            Self::TypeAlias(alias) => Some(alias.name),
            Self::TypeParameter(param) => Some(param.name),
            Self::ValueParameter(param) => Some(param.name),
            Self::EnumEntry(entry) => Some(entry.name),
            Self::AnonymousObject(_) | Self::PropertyAccessor(_) | Self::Constructor(_) => None,
        }
    }

    /// Location of the declaration
    pub fn source(&self) -> SourceLocation {
        match self {
            Self::RegularClass(class) => class.source,
            Self::AnonymousObject(object) => object.source,
            Self::SimpleFunction(function) => function.source,
            Self::Property(property) => property.source,
            Self::PropertyAccessor(accessor) => accessor.source,
            Self::Constructor(constructor) => constructor.source,
            Self::TypeAlias(alias) => alias.source,
            Self::TypeParameter(param) => param.source,
            Self::ValueParameter(param) => param.source,
            Self::EnumEntry(entry) => entry.source,
        }
    }

    /// Annotations of the declaration
    pub fn annotations(&self) -> &[Annotation] {
        match self {
            Self::RegularClass(class) => &class.annotations,
            Self::AnonymousObject(object) => &object.annotations,
            Self::SimpleFunction(function) => &function.annotations,
            Self::Property(property) => &property.annotations,
            Self::PropertyAccessor(accessor) => &accessor.annotations,
            Self::Constructor(constructor) => &constructor.annotations,
            Self::TypeAlias(alias) => &alias.annotations,
            Self::TypeParameter(param) => &param.annotations,
            Self::ValueParameter(param) => &param.annotations,
            Self::EnumEntry(entry) => &entry.annotations,
        }
    }

    /// Status of member-like declarations
    pub fn status(&self) -> Option<&DeclarationStatus> {
        match self {
            Self::RegularClass(class) => Some(&class.status),
            Self::SimpleFunction(function) => Some(&function.status),
            Self::Property(property) => Some(&property.status),
            Self::PropertyAccessor(accessor) => Some(&accessor.status),
            Self::Constructor(constructor) => Some(&constructor.status),
            Self::TypeAlias(alias) => Some(&alias.status),
            Self::EnumEntry(entry) => Some(&entry.status),
            Self::AnonymousObject(_) | Self::TypeParameter(_) | Self::ValueParameter(_) => None,
        }
    }

    /// Short description of the variant, used in logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::RegularClass(_) => "class",
            Self::AnonymousObject(_) => "anonymous object",
            Self::SimpleFunction(_) => "function",
            Self::Property(_) => "property",
            Self::PropertyAccessor(_) => "property accessor",
            Self::Constructor(_) => "constructor",
            Self::TypeAlias(_) => "type alias",
            Self::TypeParameter(_) => "type parameter",
            Self::ValueParameter(_) => "value parameter",
            Self::EnumEntry(_) => "enum entry",
        }
    }

    /// Regular class view
    pub fn as_regular_class(&self) -> Option<&RegularClass> {
        match self {
            Self::RegularClass(class) => Some(class),
            _ => None,
        }
    }

    /// Function view
    pub fn as_simple_function(&self) -> Option<&SimpleFunction> {
        match self {
            Self::SimpleFunction(function) => Some(function),
            _ => None,
        }
    }

    /// Property view
    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Self::Property(property) => Some(property),
            _ => None,
        }
    }

    /// Type parameter view
    pub fn as_type_parameter(&self) -> Option<&TypeParameter> {
        match self {
            Self::TypeParameter(param) => Some(param),
            _ => None,
        }
    }

    /// Value parameter view
    pub fn as_value_parameter(&self) -> Option<&ValueParameter> {
        match self {
            Self::ValueParameter(param) => Some(param),
            _ => None,
        }
    }
}
