//! Declaration visitor infrastructure for walking resolved modules

use crate::module::{DeclarationScope, ResolutionSession};
use crate::{
    AnonymousObject, Block, Constructor, DeclId, Declaration, EnumEntry, Property,
    PropertyAccessor, RegularClass, SimpleFunction, Statement, TypeAlias, TypeParameter,
    ValueParameter,
};
use ql_span::SourceLocation;

/// Visitor over the declaration tree
///
/// Every `visit_*` method defaults to walking the node's children with the
/// node as the new containing declaration.
pub trait DeclarationVisitor<'a> {
    /// Error that aborts the walk
    type Error;

    /// Session the visited declarations live in
    fn session(&self) -> &'a dyn ResolutionSession;

    /// Visit a declaration by ID
    fn visit_declaration(&mut self, id: DeclId, scope: DeclarationScope) -> Result<(), Self::Error> {
        let declaration = self.session().declaration(id);
        self.visit_declaration_kind(id, declaration, scope)
    }

    /// Dispatch on the declaration variant (can be overridden)
    fn visit_declaration_kind(
        &mut self,
        id: DeclId,
        declaration: &'a Declaration,
        scope: DeclarationScope,
    ) -> Result<(), Self::Error> {
        match declaration {
            Declaration::RegularClass(class) => self.visit_regular_class(id, class, scope),
            Declaration::AnonymousObject(object) => self.visit_anonymous_object(id, object, scope),
            Declaration::SimpleFunction(function) => self.visit_simple_function(id, function, scope),
            Declaration::Property(property) => self.visit_property(id, property, scope),
            Declaration::PropertyAccessor(accessor) => {
                self.visit_property_accessor(id, accessor, scope)
            }
            Declaration::Constructor(constructor) => self.visit_constructor(id, constructor, scope),
            Declaration::TypeAlias(alias) => self.visit_type_alias(id, alias, scope),
            Declaration::TypeParameter(param) => self.visit_type_parameter(id, param, scope),
            Declaration::ValueParameter(param) => self.visit_value_parameter(id, param, scope),
            Declaration::EnumEntry(entry) => self.visit_enum_entry(id, entry, scope),
        }
    }

    /// Visit class
    fn visit_regular_class(
        &mut self,
        id: DeclId,
        class: &'a RegularClass,
        scope: DeclarationScope,
    ) -> Result<(), Self::Error> {
        let inner = scope.enter(id);
        self.visit_all(&class.type_parameters, inner)?;
        self.visit_all(&class.members, inner)
    }

    /// Visit anonymous object
    fn visit_anonymous_object(
        &mut self,
        id: DeclId,
        object: &'a AnonymousObject,
        scope: DeclarationScope,
    ) -> Result<(), Self::Error> {
        self.visit_all(&object.members, scope.enter(id))
    }

    /// Visit function
    fn visit_simple_function(
        &mut self,
        id: DeclId,
        function: &'a SimpleFunction,
        scope: DeclarationScope,
    ) -> Result<(), Self::Error> {
        let inner = scope.enter(id);
        self.visit_all(&function.type_parameters, inner)?;
        self.visit_all(&function.value_parameters, inner)?;
        match &function.body {
            Some(body) => self.visit_block(body, inner),
            None => Ok(()),
        }
    }

    /// Visit property
    fn visit_property(
        &mut self,
        id: DeclId,
        property: &'a Property,
        scope: DeclarationScope,
    ) -> Result<(), Self::Error> {
        let inner = scope.enter(id);
        self.visit_all(&property.type_parameters, inner)?;
        for accessor in property.getter.iter().chain(&property.setter) {
            self.visit_declaration(*accessor, inner)?;
        }
        Ok(())
    }

    /// Visit getter or setter
    fn visit_property_accessor(
        &mut self,
        id: DeclId,
        accessor: &'a PropertyAccessor,
        scope: DeclarationScope,
    ) -> Result<(), Self::Error> {
        let inner = scope.enter(id);
        self.visit_all(&accessor.value_parameters, inner)?;
        match &accessor.body {
            Some(body) => self.visit_block(body, inner),
            None => Ok(()),
        }
    }

    /// Visit constructor
    ///
    /// Type parameters belong to the constructed class and are not revisited.
    fn visit_constructor(
        &mut self,
        id: DeclId,
        constructor: &'a Constructor,
        scope: DeclarationScope,
    ) -> Result<(), Self::Error> {
        let inner = scope.enter(id);
        self.visit_all(&constructor.value_parameters, inner)?;
        match &constructor.body {
            Some(body) => self.visit_block(body, inner),
            None => Ok(()),
        }
    }

    /// Visit type alias
    fn visit_type_alias(
        &mut self,
        id: DeclId,
        alias: &'a TypeAlias,
        scope: DeclarationScope,
    ) -> Result<(), Self::Error> {
        self.visit_all(&alias.type_parameters, scope.enter(id))
    }

    /// Visit type parameter
    fn visit_type_parameter(
        &mut self,
        _id: DeclId,
        _param: &'a TypeParameter,
        _scope: DeclarationScope,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visit value parameter
    fn visit_value_parameter(
        &mut self,
        _id: DeclId,
        _param: &'a ValueParameter,
        _scope: DeclarationScope,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visit enum entry
    fn visit_enum_entry(
        &mut self,
        id: DeclId,
        entry: &'a EnumEntry,
        scope: DeclarationScope,
    ) -> Result<(), Self::Error> {
        match entry.initializer {
            Some(initializer) => self.visit_declaration(initializer, scope.enter(id)),
            None => Ok(()),
        }
    }

    /// Visit the statements of a body
    fn visit_block(&mut self, block: &'a Block, scope: DeclarationScope) -> Result<(), Self::Error> {
        for statement in &block.statements {
            match statement {
                Statement::Declaration(id) => self.visit_declaration(*id, scope)?,
                Statement::Expression { source } => self.visit_expression(*source, scope)?,
                Statement::Block(nested) => self.visit_block(nested, scope)?,
            }
        }
        Ok(())
    }

    /// Visit an opaque expression statement
    fn visit_expression(
        &mut self,
        _source: SourceLocation,
        _scope: DeclarationScope,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visit a list of declarations in order
    fn visit_all(&mut self, ids: &[DeclId], scope: DeclarationScope) -> Result<(), Self::Error> {
        for id in ids {
            self.visit_declaration(*id, scope)?;
        }
        Ok(())
    }
}
