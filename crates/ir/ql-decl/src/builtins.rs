//! Standard library classes every module can resolve
//!
//! Declared as external classes: resolvable through the session, never
//! listed among the module's own roots.

use crate::builder::{ClassConfig, Container, ModuleBuilder, TypeParameterConfig};
use crate::{ClassKind, DeclId, TypeRef};
use ql_ty::{FunctionTypeKind, Variance};

/// Highest arity of the built-in function type families
pub const MAX_FUNCTION_ARITY: usize = 22;

/// Declares the standard classes in `builder`
pub fn declare(builder: &mut ModuleBuilder) {
    let any = builder.ty("kotlin/Any");
    let root = |builder: &mut ModuleBuilder, package: &str, name: &str, kind: ClassKind| {
        let supertypes = if name == "Any" { Vec::new() } else { vec![TypeRef::new(any.clone())] };
        builder.add_class(
            Container::External(package),
            name,
            ClassConfig {
                kind,
                supertypes,
                ..ClassConfig::default()
            },
        )
    };

    for name in ["Any", "Unit", "Nothing", "Boolean", "Char", "String", "Number"] {
        root(builder, "kotlin", name, ClassKind::Class);
    }
    for name in ["Byte", "Short", "Int", "Long", "Float", "Double"] {
        root(builder, "kotlin", name, ClassKind::Class);
    }
    root(builder, "kotlin", "CharSequence", ClassKind::Interface);
    for name in ["ExtensionFunctionType", "Deprecated", "Suppress"] {
        root(builder, "kotlin", name, ClassKind::AnnotationClass);
    }

    let comparable = root(builder, "kotlin", "Comparable", ClassKind::Interface);
    parameter(builder, comparable, "T", Variance::In);
    let array = root(builder, "kotlin", "Array", ClassKind::Class);
    parameter(builder, array, "T", Variance::Invariant);

    declare_collections(builder, &root);
    declare_function_types(builder, &root);
}

fn parameter(builder: &mut ModuleBuilder, owner: DeclId, name: &str, variance: Variance) -> DeclId {
    builder.add_type_parameter(
        owner,
        name,
        TypeParameterConfig {
            variance,
            ..TypeParameterConfig::default()
        },
    )
}

fn declare_collections(
    builder: &mut ModuleBuilder,
    root: &impl Fn(&mut ModuleBuilder, &str, &str, ClassKind) -> DeclId,
) {
    const PACKAGE: &str = "kotlin.collections";
    for (name, variance) in [
        ("Iterable", Variance::Out),
        ("MutableIterable", Variance::Out),
        ("Collection", Variance::Out),
        ("MutableCollection", Variance::Invariant),
        ("List", Variance::Out),
        ("MutableList", Variance::Invariant),
        ("Set", Variance::Out),
        ("MutableSet", Variance::Invariant),
    ] {
        let class = root(builder, PACKAGE, name, ClassKind::Interface);
        parameter(builder, class, "E", variance);
    }

    let map = root(builder, PACKAGE, "Map", ClassKind::Interface);
    parameter(builder, map, "K", Variance::Invariant);
    parameter(builder, map, "V", Variance::Out);
    let entry = builder.add_class(
        Container::Class(map),
        "Entry",
        ClassConfig {
            kind: ClassKind::Interface,
            ..ClassConfig::default()
        },
    );
    parameter(builder, entry, "K", Variance::Out);
    parameter(builder, entry, "V", Variance::Out);

    let mutable_map = root(builder, PACKAGE, "MutableMap", ClassKind::Interface);
    parameter(builder, mutable_map, "K", Variance::Invariant);
    parameter(builder, mutable_map, "V", Variance::Invariant);
    let mutable_entry = builder.add_class(
        Container::Class(mutable_map),
        "MutableEntry",
        ClassConfig {
            kind: ClassKind::Interface,
            ..ClassConfig::default()
        },
    );
    parameter(builder, mutable_entry, "K", Variance::Invariant);
    parameter(builder, mutable_entry, "V", Variance::Invariant);
}

fn declare_function_types(
    builder: &mut ModuleBuilder,
    root: &impl Fn(&mut ModuleBuilder, &str, &str, ClassKind) -> DeclId,
) {
    for (package, prefix, kind) in [
        ("kotlin", "Function", FunctionTypeKind::Function),
        ("kotlin.coroutines", "SuspendFunction", FunctionTypeKind::SuspendFunction),
    ] {
        for arity in 0..=MAX_FUNCTION_ARITY {
            let name = format!("{prefix}{arity}");
            let class = root(builder, package, &name, ClassKind::Interface);
            for index in 1..=arity {
                parameter(builder, class, &format!("P{index}"), Variance::In);
            }
            parameter(builder, class, "R", Variance::Out);
            let path = format!("{}/{name}", package.replace('.', "/"));
            let class_id = builder.class_id(&path);
            builder.register_function_type(class_id, kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::ModuleBuilder;
    use crate::module::ResolutionSession;
    use ql_ty::FunctionTypeKind;

    #[test]
    fn test_standard_classes_resolve_but_are_not_roots() {
        let module = ModuleBuilder::new().finish();
        assert!(module.roots().is_empty());
        let any = module.standard().any.clone();
        assert!(module.resolve_class(&any).is_some());
        let entry = ql_ty::ClassId::parse(module.interner(), "kotlin/collections/Map.Entry");
        assert!(module.expand_to_regular_class(&entry).is_some());
    }

    #[test]
    fn test_function_types_are_registered() {
        let builder = ModuleBuilder::new();
        let int = builder.ty("kotlin/Int");
        let plain = builder.function_ty(None, vec![int.clone()], int.clone());
        let suspend = builder.suspend_function_ty(None, Vec::new(), int.clone());
        let module = builder.finish();
        let kind = |ty: &ql_ty::TypeShape| ty.as_class_like().and_then(|class| module.function_type_kind(class));
        assert_eq!(kind(&plain), Some(FunctionTypeKind::Function));
        assert_eq!(kind(&suspend), Some(FunctionTypeKind::SuspendFunction));
        assert_eq!(kind(&int), None);
    }
}
