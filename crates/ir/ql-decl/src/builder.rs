//! Construction of resolved modules
//!
//! The resolution stage (and every test) assembles a [`ResolvedModule`]
//! through [`ModuleBuilder`]: each `add_*` call allocates one declaration,
//! attaches it to its container and returns its id. Configuration is passed
//! as plain structs with `Default`, so call sites only spell out what differs
//! from an ordinary public declaration.

use crate::module::ResolvedModule;
use crate::status::{DeclarationStatus, Modality, Modifier, Modifiers, Visibility};
use crate::{
    Annotation, AnonymousObject, Block, ClassKind, Constructor, DeclId, Declaration, EnumEntry,
    Property, PropertyAccessor, RegularClass, SimpleFunction, Statement, TypeAlias, TypeParameter,
    TypeRef, ValueParameter,
};
use la_arena::Arena;
use ql_intern::{Interner, Symbol};
use ql_span::{FileId, SourceLocation, Span};
use ql_ty::{
    ClassId, ClassLikeType, FunctionTypeKind, StandardClassIds, TypeProjection, TypeShape,
    Variance,
};
use rustc_hash::FxHashMap;
use tracing::warn;

/// Where a new declaration is attached
#[derive(Debug, Clone, Copy)]
pub enum Container<'p> {
    /// Top-level declaration of this module in the dotted package
    Package(&'p str),
    /// Top-level declaration of a dependency: resolvable, but not a root
    External(&'p str),
    /// Member of a class, object, anonymous object or enum entry body
    Class(DeclId),
    /// Local declaration in the body of a function, constructor or accessor
    Body(DeclId),
}

/// Class configuration
#[derive(Debug, Clone, Default)]
pub struct ClassConfig {
    /// Kind tag
    pub kind: ClassKind,
    /// Visibility; local classes default to `local`
    pub visibility: Visibility,
    /// Modality; inferred from the kind when absent
    pub modality: Option<Modality>,
    /// Modifier flags (`inner`, `data`, `fun`, ...)
    pub modifiers: Modifiers,
    /// Companion object
    pub companion: bool,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// Direct supertypes
    pub supertypes: Vec<TypeRef>,
}

/// Function configuration
#[derive(Debug, Clone, Default)]
pub struct FunctionConfig {
    /// Visibility; local functions default to `local`
    pub visibility: Visibility,
    /// Modality; inferred from the container when absent
    pub modality: Option<Modality>,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Written with `override`
    pub override_keyword: bool,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// Extension receiver
    pub receiver: Option<TypeRef>,
    /// Return type, `Unit` when absent
    pub return_type: Option<TypeRef>,
    /// Whether the function has a body
    pub has_body: bool,
}

/// Property configuration
#[derive(Debug, Clone, Default)]
pub struct PropertyConfig {
    /// Visibility; local properties default to `local`
    pub visibility: Visibility,
    /// Modality; inferred from the container when absent
    pub modality: Option<Modality>,
    /// Modifier flags (`const`, `lateinit`, ...)
    pub modifiers: Modifiers,
    /// Written with `override`
    pub override_keyword: bool,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// `var` rather than `val`
    pub is_var: bool,
    /// Extension receiver
    pub receiver: Option<TypeRef>,
}

/// Accessor configuration
#[derive(Debug, Clone, Default)]
pub struct AccessorConfig {
    /// Visibility
    pub visibility: Visibility,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// Whether the accessor has a body
    pub has_body: bool,
}

/// Constructor configuration
#[derive(Debug, Clone, Default)]
pub struct ConstructorConfig {
    /// Visibility
    pub visibility: Visibility,
    /// Annotations
    pub annotations: Vec<Annotation>,
    /// Primary constructor
    pub is_primary: bool,
    /// Whether the constructor has a body
    pub has_body: bool,
}

/// Type alias configuration
#[derive(Debug, Clone, Default)]
pub struct TypeAliasConfig {
    /// Visibility
    pub visibility: Visibility,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Annotations
    pub annotations: Vec<Annotation>,
}

/// Type parameter configuration
#[derive(Debug, Clone, Default)]
pub struct TypeParameterConfig {
    /// Declaration-site variance
    pub variance: Variance,
    /// `reified`
    pub reified: bool,
    /// Upper bounds in declaration order
    pub bounds: Vec<TypeRef>,
    /// Annotations
    pub annotations: Vec<Annotation>,
}

/// Value parameter configuration
#[derive(Debug, Clone, Default)]
pub struct ValueParameterConfig {
    /// `vararg`, `crossinline` and `noinline`
    pub modifiers: Modifiers,
    /// Declared as `var` in a primary constructor
    pub is_var: bool,
    /// Declares a default value
    pub has_default_value: bool,
    /// Annotations
    pub annotations: Vec<Annotation>,
}

/// Builder for [`ResolvedModule`]
#[derive(Debug)]
pub struct ModuleBuilder {
    interner: Interner,
    standard: StandardClassIds,
    declarations: Arena<Declaration>,
    classes: FxHashMap<ClassId, DeclId>,
    function_types: FxHashMap<ClassId, FunctionTypeKind>,
    packages: FxHashMap<DeclId, Vec<Symbol>>,
    roots: Vec<DeclId>,
    file: FileId,
    offset: u32,
    anonymous_objects: u32,
}

impl Default for ModuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleBuilder {
    /// Builder with the standard classes already declared
    pub fn new() -> Self {
        Self::with_interner(Interner::new())
    }

    /// Builder sharing `interner`, with the standard classes declared
    pub fn with_interner(interner: Interner) -> Self {
        let mut builder = Self::bare(interner);
        crate::builtins::declare(&mut builder);
        builder
    }

    /// Builder without any predeclared class
    pub fn bare(interner: Interner) -> Self {
        Self {
            standard: StandardClassIds::new(&interner),
            interner,
            declarations: Arena::default(),
            classes: FxHashMap::default(),
            function_types: FxHashMap::default(),
            packages: FxHashMap::default(),
            roots: Vec::new(),
            file: FileId(0),
            offset: 0,
            anonymous_objects: 0,
        }
    }

    /// Freezes the builder into a module
    pub fn finish(self) -> ResolvedModule {
        ResolvedModule {
            declarations: self.declarations,
            classes: self.classes,
            function_types: self.function_types,
            roots: self.roots,
            interner: self.interner,
            standard: self.standard,
        }
    }

    /// Interner shared with the finished module
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Standard class ids
    pub fn standard(&self) -> &StandardClassIds {
        &self.standard
    }

    /// Switches the file subsequent declarations are located in
    pub fn set_file(&mut self, file: FileId) {
        self.file = file;
        self.offset = 0;
    }

    /// Mutable access for adjustments the configs do not cover
    pub fn declaration_mut(&mut self, id: DeclId) -> &mut Declaration {
        &mut self.declarations[id]
    }

    /// Declaration allocated so far
    pub fn declaration(&self, id: DeclId) -> &Declaration {
        &self.declarations[id]
    }

    /// Registers `class_id` as a built-in function type
    pub fn register_function_type(&mut self, class_id: ClassId, kind: FunctionTypeKind) {
        self.function_types.insert(class_id, kind);
    }

    // Types

    /// Parses a `pkg/path/Outer.Inner` class id
    pub fn class_id(&self, path: &str) -> ClassId {
        ClassId::parse(&self.interner, path)
    }

    /// Non-nullable class type without arguments
    pub fn ty(&self, path: &str) -> TypeShape {
        TypeShape::class(self.class_id(path))
    }

    /// Class type applied to arguments
    pub fn generic(&self, path: &str, arguments: Vec<TypeProjection>) -> TypeShape {
        TypeShape::generic(self.class_id(path), arguments)
    }

    /// Reference to a type parameter by name
    pub fn type_parameter_ty(&self, name: &str) -> TypeShape {
        TypeShape::parameter(self.interner.intern(name))
    }

    /// `(P1, ..., Pn) -> R`, or `Receiver.(P1, ..., Pn) -> R` with a receiver
    pub fn function_ty(
        &self,
        receiver: Option<TypeShape>,
        parameters: Vec<TypeShape>,
        return_type: TypeShape,
    ) -> TypeShape {
        self.function_like_ty("kotlin/Function", receiver, parameters, return_type)
    }

    /// `suspend (P1, ..., Pn) -> R`
    pub fn suspend_function_ty(
        &self,
        receiver: Option<TypeShape>,
        parameters: Vec<TypeShape>,
        return_type: TypeShape,
    ) -> TypeShape {
        self.function_like_ty("kotlin/coroutines/SuspendFunction", receiver, parameters, return_type)
    }

    fn function_like_ty(
        &self,
        family: &str,
        receiver: Option<TypeShape>,
        parameters: Vec<TypeShape>,
        return_type: TypeShape,
    ) -> TypeShape {
        let extension_function = receiver.is_some();
        let arguments: Vec<TypeProjection> = receiver
            .into_iter()
            .chain(parameters)
            .chain(std::iter::once(return_type))
            .map(TypeProjection::Invariant)
            .collect();
        let class_id = self.class_id(&format!("{family}{}", arguments.len() - 1));
        TypeShape::ClassLike(ClassLikeType {
            class_id,
            arguments,
            nullable: false,
            extension_function,
        })
    }

    /// Annotation application with rendered arguments
    pub fn annotation(&self, path: &str, arguments: &[&str]) -> Annotation {
        Annotation {
            class_id: self.class_id(path),
            arguments: arguments.iter().map(|argument| (*argument).to_string()).collect(),
            use_site: None,
        }
    }

    /// Default type of a class: the class applied to its own type parameters
    ///
    /// Inner classes also receive the type parameters of their outer classes,
    /// innermost first.
    pub fn class_type(&self, class: DeclId) -> TypeShape {
        let Declaration::RegularClass(regular) = &self.declarations[class] else {
            return TypeShape::Error;
        };
        let mut arguments = self.type_parameter_arguments(&regular.type_parameters);
        let mut current = regular;
        while current.is_inner() {
            let Some(outer) = current
                .class_id
                .outer()
                .and_then(|outer| self.classes.get(&outer))
                .and_then(|id| self.declarations[*id].as_regular_class())
            else {
                break;
            };
            arguments.extend(self.type_parameter_arguments(&outer.type_parameters));
            current = outer;
        }
        TypeShape::generic(regular.class_id.clone(), arguments)
    }

    fn type_parameter_arguments(&self, params: &[DeclId]) -> Vec<TypeProjection> {
        params
            .iter()
            .filter_map(|id| self.declarations[*id].as_type_parameter())
            .map(|param| TypeProjection::Invariant(TypeShape::parameter(param.name)))
            .collect()
    }

    // Declarations

    /// Adds a class, interface, object, enum class or annotation class
    pub fn add_class(&mut self, container: Container<'_>, name: &str, config: ClassConfig) -> DeclId {
        let name = self.interner.intern(name);
        let class_id = self.nested_class_id(container, name);
        let modality = config.modality.unwrap_or(match config.kind {
            ClassKind::Interface => Modality::Abstract,
            _ => Modality::Final,
        });
        let declaration = Declaration::RegularClass(RegularClass {
            name,
            class_id: class_id.clone(),
            source: self.next_location(),
            annotations: config.annotations,
            status: DeclarationStatus {
                visibility: Self::visibility_in(container, config.visibility),
                modality: Some(modality),
                modifiers: config.modifiers,
                has_override_keyword: false,
            },
            kind: config.kind,
            is_companion: config.companion,
            type_parameters: Vec::new(),
            supertypes: config.supertypes,
            members: Vec::new(),
        });
        let id = self.alloc(container, declaration);
        self.classes.insert(class_id, id);
        id
    }

    /// Adds an anonymous object expression
    pub fn add_anonymous_object(
        &mut self,
        container: Container<'_>,
        supertypes: Vec<TypeRef>,
    ) -> DeclId {
        self.anonymous_objects += 1;
        let name = self
            .interner
            .intern(&format!("<anonymous object {}>", self.anonymous_objects));
        let class_id = ClassId::top_level(self.package_in(container), name).into_local();
        let declaration = Declaration::AnonymousObject(AnonymousObject {
            class_id: class_id.clone(),
            source: self.next_location(),
            annotations: Vec::new(),
            supertypes,
            members: Vec::new(),
        });
        let id = self.alloc(container, declaration);
        self.classes.insert(class_id, id);
        id
    }

    /// Adds a function
    pub fn add_function(
        &mut self,
        container: Container<'_>,
        name: &str,
        config: FunctionConfig,
    ) -> DeclId {
        let modality = config
            .modality
            .unwrap_or_else(|| self.callable_modality(container, config.has_body, config.override_keyword));
        let return_type = config
            .return_type
            .unwrap_or_else(|| TypeRef::new(TypeShape::class(self.standard.unit.clone())));
        let declaration = Declaration::SimpleFunction(SimpleFunction {
            name: self.interner.intern(name),
            source: self.next_location(),
            annotations: config.annotations,
            status: DeclarationStatus {
                visibility: Self::visibility_in(container, config.visibility),
                modality: Some(modality),
                modifiers: config.modifiers,
                has_override_keyword: config.override_keyword,
            },
            type_parameters: Vec::new(),
            receiver: config.receiver,
            value_parameters: Vec::new(),
            return_type,
            body: config.has_body.then(Block::default),
        });
        self.alloc(container, declaration)
    }

    /// Adds a property
    pub fn add_property(
        &mut self,
        container: Container<'_>,
        name: &str,
        ty: impl Into<TypeRef>,
        config: PropertyConfig,
    ) -> DeclId {
        let modality = config
            .modality
            .unwrap_or_else(|| self.callable_modality(container, false, config.override_keyword));
        let declaration = Declaration::Property(Property {
            name: self.interner.intern(name),
            source: self.next_location(),
            annotations: config.annotations,
            status: DeclarationStatus {
                visibility: Self::visibility_in(container, config.visibility),
                modality: Some(modality),
                modifiers: config.modifiers,
                has_override_keyword: config.override_keyword,
            },
            is_var: config.is_var,
            type_parameters: Vec::new(),
            receiver: config.receiver,
            return_type: ty.into(),
            getter: None,
            setter: None,
        });
        self.alloc(container, declaration)
    }

    /// Adds the getter of `property`
    pub fn add_getter(&mut self, property: DeclId, config: AccessorConfig) -> DeclId {
        self.add_accessor(property, true, config)
    }

    /// Adds the setter of `property`, with its `value` parameter
    pub fn add_setter(&mut self, property: DeclId, config: AccessorConfig) -> DeclId {
        let setter = self.add_accessor(property, false, config);
        let ty = self.property_type(property);
        self.add_value_parameter(setter, "value", ty, ValueParameterConfig::default());
        setter
    }

    fn add_accessor(&mut self, property: DeclId, is_getter: bool, config: AccessorConfig) -> DeclId {
        let modality = self.declarations[property].status().and_then(|status| status.modality);
        let return_type = if is_getter {
            self.property_type(property)
        } else {
            TypeRef::new(TypeShape::class(self.standard.unit.clone()))
        };
        let source = self.next_location();
        let id = self.declarations.alloc(Declaration::PropertyAccessor(PropertyAccessor {
            is_getter,
            source,
            annotations: config.annotations,
            status: DeclarationStatus {
                visibility: config.visibility,
                modality,
                modifiers: config.modifiers,
                has_override_keyword: false,
            },
            value_parameters: Vec::new(),
            return_type,
            body: config.has_body.then(Block::default),
        }));
        self.inherit_package(property, id);
        match &mut self.declarations[property] {
            Declaration::Property(owner) if is_getter => owner.getter = Some(id),
            Declaration::Property(owner) => owner.setter = Some(id),
            other => warn!(owner = other.kind_name(), "accessor attached to a non-property"),
        }
        id
    }

    fn property_type(&self, property: DeclId) -> TypeRef {
        self.declarations[property]
            .as_property()
            .map_or_else(|| TypeRef::new(TypeShape::Error), |owner| owner.return_type.clone())
    }

    /// Adds a constructor to a class, anonymous object or enum entry body
    pub fn add_constructor(&mut self, class: DeclId, config: ConstructorConfig) -> DeclId {
        let (type_parameters, return_type) = match &self.declarations[class] {
            Declaration::RegularClass(regular) => {
                (regular.type_parameters.clone(), self.class_type(class))
            }
            Declaration::AnonymousObject(object) => {
                (Vec::new(), TypeShape::class(object.class_id.clone()))
            }
            _ => (Vec::new(), TypeShape::Error),
        };
        let declaration = Declaration::Constructor(Constructor {
            source: self.next_location(),
            annotations: config.annotations,
            status: DeclarationStatus {
                visibility: config.visibility,
                modality: Some(Modality::Final),
                modifiers: Modifiers::empty(),
                has_override_keyword: false,
            },
            is_primary: config.is_primary,
            type_parameters,
            value_parameters: Vec::new(),
            return_type: TypeRef::new(return_type),
            body: config.has_body.then(Block::default),
        });
        self.alloc(Container::Class(class), declaration)
    }

    /// Adds a type alias
    pub fn add_type_alias(
        &mut self,
        container: Container<'_>,
        name: &str,
        expanded: impl Into<TypeRef>,
        config: TypeAliasConfig,
    ) -> DeclId {
        let name = self.interner.intern(name);
        let class_id = self.nested_class_id(container, name);
        let declaration = Declaration::TypeAlias(TypeAlias {
            name,
            class_id: class_id.clone(),
            source: self.next_location(),
            annotations: config.annotations,
            status: DeclarationStatus {
                visibility: config.visibility,
                modality: Some(Modality::Final),
                modifiers: config.modifiers,
                has_override_keyword: false,
            },
            type_parameters: Vec::new(),
            expanded: expanded.into(),
        });
        let id = self.alloc(container, declaration);
        self.classes.insert(class_id, id);
        id
    }

    /// Adds an entry to an enum class, optionally with a class body
    pub fn add_enum_entry(&mut self, enum_class: DeclId, name: &str, with_body: bool) -> DeclId {
        let return_type = TypeRef::new(self.class_type(enum_class));
        let entry_name = self.interner.intern(name);
        let declaration = Declaration::EnumEntry(EnumEntry {
            name: entry_name,
            source: self.next_location(),
            annotations: Vec::new(),
            status: DeclarationStatus {
                visibility: Visibility::Public,
                modality: None,
                modifiers: Modifiers::empty(),
                has_override_keyword: false,
            },
            return_type: return_type.clone(),
            initializer: None,
        });
        let entry = self.alloc(Container::Class(enum_class), declaration);
        if with_body {
            let body = self.add_anonymous_object(Container::Body(entry), vec![return_type]);
            if let Declaration::EnumEntry(owner) = &mut self.declarations[entry] {
                owner.initializer = Some(body);
            }
        }
        entry
    }

    /// Adds a type parameter to a class, callable or type alias
    pub fn add_type_parameter(
        &mut self,
        owner: DeclId,
        name: &str,
        config: TypeParameterConfig,
    ) -> DeclId {
        let source = self.next_location();
        let id = self.declarations.alloc(Declaration::TypeParameter(TypeParameter {
            name: self.interner.intern(name),
            source,
            annotations: config.annotations,
            variance: config.variance,
            is_reified: config.reified,
            bounds: config.bounds,
        }));
        self.inherit_package(owner, id);
        match &mut self.declarations[owner] {
            Declaration::RegularClass(class) => class.type_parameters.push(id),
            Declaration::SimpleFunction(function) => function.type_parameters.push(id),
            Declaration::Property(property) => property.type_parameters.push(id),
            Declaration::TypeAlias(alias) => alias.type_parameters.push(id),
            other => warn!(owner = other.kind_name(), "type parameter attached to unsupported owner"),
        }
        id
    }

    /// Adds a value parameter to a function, constructor or setter
    pub fn add_value_parameter(
        &mut self,
        owner: DeclId,
        name: &str,
        ty: impl Into<TypeRef>,
        config: ValueParameterConfig,
    ) -> DeclId {
        let source = self.next_location();
        let id = self.declarations.alloc(Declaration::ValueParameter(ValueParameter {
            name: self.interner.intern(name),
            source,
            annotations: config.annotations,
            modifiers: config.modifiers,
            is_var: config.is_var,
            return_type: ty.into(),
            has_default_value: config.has_default_value,
        }));
        self.inherit_package(owner, id);
        match &mut self.declarations[owner] {
            Declaration::SimpleFunction(function) => function.value_parameters.push(id),
            Declaration::Constructor(constructor) => constructor.value_parameters.push(id),
            Declaration::PropertyAccessor(accessor) => accessor.value_parameters.push(id),
            other => warn!(owner = other.kind_name(), "value parameter attached to unsupported owner"),
        }
        id
    }

    /// Appends an opaque expression statement to a body
    pub fn add_expression(&mut self, owner: DeclId) {
        let source = self.next_location();
        if let Some(body) = self.body_mut(owner) {
            body.statements.push(Statement::Expression { source });
        }
    }

    fn alloc(&mut self, container: Container<'_>, declaration: Declaration) -> DeclId {
        let package = self.package_in(container);
        let id = self.declarations.alloc(declaration);
        self.packages.insert(id, package);
        match container {
            Container::Package(_) => self.roots.push(id),
            Container::External(_) => {}
            Container::Class(owner) => match &mut self.declarations[owner] {
                Declaration::RegularClass(class) => class.members.push(id),
                Declaration::AnonymousObject(object) => object.members.push(id),
                other => warn!(owner = other.kind_name(), "member attached to a non-class"),
            },
            Container::Body(owner) => {
                if let Some(body) = self.body_mut(owner) {
                    body.statements.push(Statement::Declaration(id));
                }
            }
        }
        id
    }

    fn body_mut(&mut self, owner: DeclId) -> Option<&mut Block> {
        match &mut self.declarations[owner] {
            Declaration::SimpleFunction(function) => Some(function.body.get_or_insert_with(Block::default)),
            Declaration::Constructor(constructor) => {
                Some(constructor.body.get_or_insert_with(Block::default))
            }
            Declaration::PropertyAccessor(accessor) => {
                Some(accessor.body.get_or_insert_with(Block::default))
            }
            Declaration::EnumEntry(_) => None,
            other => {
                warn!(owner = other.kind_name(), "statement attached to a declaration without a body");
                None
            }
        }
    }

    fn inherit_package(&mut self, owner: DeclId, id: DeclId) {
        let package = self.packages.get(&owner).cloned().unwrap_or_default();
        self.packages.insert(id, package);
    }

    fn package_in(&self, container: Container<'_>) -> Vec<Symbol> {
        match container {
            Container::Package(package) | Container::External(package) => package
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(|segment| self.interner.intern(segment))
                .collect(),
            Container::Class(owner) | Container::Body(owner) => {
                self.packages.get(&owner).cloned().unwrap_or_default()
            }
        }
    }

    fn nested_class_id(&self, container: Container<'_>, name: Symbol) -> ClassId {
        match container {
            Container::Class(owner) => match &self.declarations[owner] {
                Declaration::RegularClass(class) => class.class_id.nested(name),
                Declaration::AnonymousObject(object) => object.class_id.nested(name),
                _ => ClassId::top_level(self.package_in(container), name),
            },
            Container::Body(_) => ClassId::top_level(self.package_in(container), name).into_local(),
            Container::Package(_) | Container::External(_) => {
                ClassId::top_level(self.package_in(container), name)
            }
        }
    }

    fn visibility_in(container: Container<'_>, visibility: Visibility) -> Visibility {
        match container {
            Container::Body(_) if visibility == Visibility::Public => Visibility::Local,
            _ => visibility,
        }
    }

    fn callable_modality(&self, container: Container<'_>, has_body: bool, is_override: bool) -> Modality {
        let Container::Class(owner) = container else {
            return Modality::Final;
        };
        match self.declarations[owner].as_regular_class() {
            Some(class) if class.is_interface() => {
                if has_body {
                    Modality::Open
                } else {
                    Modality::Abstract
                }
            }
            Some(class) if is_override && class.status.modality != Some(Modality::Final) => {
                Modality::Open
            }
            _ => Modality::Final,
        }
    }

    fn next_location(&mut self) -> SourceLocation {
        let start = self.offset;
        self.offset += 1;
        SourceLocation::new(self.file, Span::new(start, self.offset))
    }
}

/// Shorthand for a modifier set
pub fn modifiers(list: &[Modifier]) -> Modifiers {
    list.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ResolutionSession;

    #[test]
    fn test_nested_and_local_class_ids() {
        let mut builder = ModuleBuilder::new();
        let outer = builder.add_class(Container::Package("a.b"), "Outer", ClassConfig::default());
        let inner = builder.add_class(Container::Class(outer), "Inner", ClassConfig::default());
        let function = builder.add_function(Container::Class(outer), "f", FunctionConfig::default());
        let local = builder.add_class(Container::Body(function), "Local", ClassConfig::default());
        let module = builder.finish();
        let interner = module.interner();

        let inner_class = module.declaration(inner).as_regular_class().map(|c| c.class_id.clone());
        assert_eq!(
            inner_class.map(|id| id.as_fq_name(interner)),
            Some("a.b.Outer.Inner".to_string())
        );
        let local_class = module.declaration(local).as_regular_class();
        assert_eq!(local_class.map(|class| class.class_id.local), Some(true));
        assert_eq!(local_class.map(|class| class.status.visibility), Some(Visibility::Local));
        assert_eq!(module.roots(), &[outer]);
    }

    #[test]
    fn test_interface_member_modality_inference() {
        let mut builder = ModuleBuilder::new();
        let interface = builder.add_class(
            Container::Package("p"),
            "I",
            ClassConfig {
                kind: ClassKind::Interface,
                ..ClassConfig::default()
            },
        );
        let abstract_fn = builder.add_function(Container::Class(interface), "f", FunctionConfig::default());
        let open_fn = builder.add_function(
            Container::Class(interface),
            "g",
            FunctionConfig {
                has_body: true,
                ..FunctionConfig::default()
            },
        );
        let module = builder.finish();
        let modality = |id| module.declaration(id).status().and_then(|status| status.modality);
        assert_eq!(modality(interface), Some(Modality::Abstract));
        assert_eq!(modality(abstract_fn), Some(Modality::Abstract));
        assert_eq!(modality(open_fn), Some(Modality::Open));
    }

    #[test]
    fn test_function_type_shape() {
        let builder = ModuleBuilder::new();
        let int = builder.ty("kotlin/Int");
        let string = builder.ty("kotlin/String");
        let ty = builder.function_ty(Some(string), vec![int.clone()], int);
        let class = ty.as_class_like();
        assert_eq!(class.map(|class| class.arguments.len()), Some(3));
        assert_eq!(class.map(|class| class.extension_function), Some(true));
        assert_eq!(
            class.map(|class| class.class_id.as_fq_name(builder.interner())),
            Some("kotlin.Function2".to_string())
        );
    }

    #[test]
    fn test_inner_class_type_includes_outer_parameters() {
        let mut builder = ModuleBuilder::new();
        let outer = builder.add_class(Container::Package("p"), "Outer", ClassConfig::default());
        builder.add_type_parameter(outer, "A", TypeParameterConfig::default());
        let inner = builder.add_class(
            Container::Class(outer),
            "Inner",
            ClassConfig {
                modifiers: modifiers(&[Modifier::Inner]),
                ..ClassConfig::default()
            },
        );
        builder.add_type_parameter(inner, "B", TypeParameterConfig::default());
        let ty = builder.class_type(inner);
        let b = builder.type_parameter_ty("B");
        let a = builder.type_parameter_ty("A");
        assert_eq!(
            ty.as_class_like().map(|class| class.arguments.clone()),
            Some(vec![TypeProjection::Invariant(b), TypeProjection::Invariant(a)])
        );
    }

    #[test]
    fn test_parameters_and_accessors_get_their_own_locations() {
        let mut builder = ModuleBuilder::new();
        let int = builder.ty("kotlin/Int");
        let function = builder.add_function(Container::Package("p"), "f", FunctionConfig::default());
        let type_parameter = builder.add_type_parameter(function, "T", TypeParameterConfig::default());
        let parameter = builder.add_value_parameter(function, "x", int.clone(), ValueParameterConfig::default());
        let property = builder.add_property(Container::Package("p"), "v", int, PropertyConfig::default());
        let getter = builder.add_getter(property, AccessorConfig::default());
        let module = builder.finish();

        let starts: Vec<_> = [function, type_parameter, parameter, property, getter]
            .into_iter()
            .map(|id| module.declaration(id).source().span.start)
            .collect();
        assert!(starts.windows(2).all(|pair| pair[0] < pair[1]), "{starts:?}");
    }

    #[test]
    fn test_alias_expansion_and_cycle_guard() {
        let mut builder = ModuleBuilder::new();
        let target = builder.add_class(Container::Package("p"), "Target", ClassConfig::default());
        let target_ty = builder.ty("p/Target");
        builder.add_type_alias(Container::Package("p"), "A", target_ty, TypeAliasConfig::default());
        let loop_b = builder.ty("p/LoopB");
        builder.add_type_alias(Container::Package("p"), "LoopA", loop_b, TypeAliasConfig::default());
        let loop_a = builder.ty("p/LoopA");
        builder.add_type_alias(Container::Package("p"), "LoopB", loop_a, TypeAliasConfig::default());
        let module = builder.finish();

        let resolved = module.expand_to_regular_class(&ClassId::parse(module.interner(), "p/A"));
        assert_eq!(resolved.map(|(id, _)| id), Some(target));
        let cyclic = module.expand_to_regular_class(&ClassId::parse(module.interner(), "p/LoopA"));
        assert!(cyclic.is_none());
    }
}
