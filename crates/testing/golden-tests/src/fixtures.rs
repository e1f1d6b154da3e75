//! Modules behind the golden files

use ql_decl::{
    AccessorConfig, ClassConfig, ClassKind, Container, ConstructorConfig, FunctionConfig, Modality,
    Modifier, ModuleBuilder, PropertyConfig, ResolvedModule, TypeAliasConfig, TypeParameterConfig,
    ValueParameterConfig, modifiers,
};

const GEOMETRY: &str = "geometry";

/// Shape hierarchy with an enum, a type alias and a generic function
///
/// ```kotlin
/// package geometry
///
/// interface Shape {
///     fun area(): Double
///     val name: String
/// }
/// fun interface Transform { fun apply(shape: Shape): Shape }
/// abstract class Polygon(val sides: Int) : Shape {
///     override fun area(): Double { }
///     abstract val corners: Int
/// }
/// class Square : Polygon {
///     override val corners: Int get() { }
/// }
/// enum class Color { RED, GREEN { } }
/// typealias Shapes = List<Shape>
/// fun <T : Shape> largest(shapes: List<T>): T?
/// ```
pub fn geometry() -> ResolvedModule {
    let mut builder = ModuleBuilder::new();
    let double = builder.ty("kotlin/Double");
    let int = builder.ty("kotlin/Int");
    let string = builder.ty("kotlin/String");

    let shape = builder.add_class(
        Container::Package(GEOMETRY),
        "Shape",
        ClassConfig {
            kind: ClassKind::Interface,
            ..ClassConfig::default()
        },
    );
    builder.add_function(
        Container::Class(shape),
        "area",
        FunctionConfig {
            return_type: Some(double.clone().into()),
            ..FunctionConfig::default()
        },
    );
    builder.add_property(Container::Class(shape), "name", string, PropertyConfig::default());
    let shape_ty = builder.class_type(shape);

    let transform = builder.add_class(
        Container::Package(GEOMETRY),
        "Transform",
        ClassConfig {
            kind: ClassKind::Interface,
            modifiers: modifiers(&[Modifier::Fun]),
            ..ClassConfig::default()
        },
    );
    let apply = builder.add_function(
        Container::Class(transform),
        "apply",
        FunctionConfig {
            return_type: Some(shape_ty.clone().into()),
            ..FunctionConfig::default()
        },
    );
    builder.add_value_parameter(apply, "shape", shape_ty.clone(), ValueParameterConfig::default());

    let polygon = builder.add_class(
        Container::Package(GEOMETRY),
        "Polygon",
        ClassConfig {
            modality: Some(Modality::Abstract),
            supertypes: vec![shape_ty.clone().into()],
            ..ClassConfig::default()
        },
    );
    let constructor = builder.add_constructor(
        polygon,
        ConstructorConfig {
            is_primary: true,
            ..ConstructorConfig::default()
        },
    );
    builder.add_value_parameter(constructor, "sides", int.clone(), ValueParameterConfig::default());
    builder.add_function(
        Container::Class(polygon),
        "area",
        FunctionConfig {
            override_keyword: true,
            return_type: Some(double.into()),
            has_body: true,
            ..FunctionConfig::default()
        },
    );
    builder.add_property(
        Container::Class(polygon),
        "corners",
        int.clone(),
        PropertyConfig {
            modality: Some(Modality::Abstract),
            ..PropertyConfig::default()
        },
    );
    let polygon_ty = builder.class_type(polygon);

    let square = builder.add_class(
        Container::Package(GEOMETRY),
        "Square",
        ClassConfig {
            supertypes: vec![polygon_ty.into()],
            ..ClassConfig::default()
        },
    );
    let corners = builder.add_property(
        Container::Class(square),
        "corners",
        int,
        PropertyConfig {
            override_keyword: true,
            ..PropertyConfig::default()
        },
    );
    builder.add_getter(
        corners,
        AccessorConfig {
            has_body: true,
            ..AccessorConfig::default()
        },
    );

    let color = builder.add_class(
        Container::Package(GEOMETRY),
        "Color",
        ClassConfig {
            kind: ClassKind::EnumClass,
            ..ClassConfig::default()
        },
    );
    builder.add_enum_entry(color, "RED", false);
    builder.add_enum_entry(color, "GREEN", true);

    let shapes = builder.generic("kotlin/collections/List", vec![shape_ty.clone().into()]);
    builder.add_type_alias(Container::Package(GEOMETRY), "Shapes", shapes, TypeAliasConfig::default());

    let type_parameter = builder.type_parameter_ty("T");
    let largest = builder.add_function(
        Container::Package(GEOMETRY),
        "largest",
        FunctionConfig {
            return_type: Some(type_parameter.clone().nullable().into()),
            ..FunctionConfig::default()
        },
    );
    builder.add_type_parameter(
        largest,
        "T",
        TypeParameterConfig {
            bounds: vec![shape_ty.into()],
            ..TypeParameterConfig::default()
        },
    );
    let list = builder.generic("kotlin/collections/List", vec![type_parameter.into()]);
    builder.add_value_parameter(largest, "shapes", list, ValueParameterConfig::default());

    builder.finish()
}

/// A class whose members and bodies render as nested blocks
///
/// ```kotlin
/// package app
///
/// @Deprecated("use Worker")
/// open class Service {
///     fun start() {
///         class Job
///     }
///     var state: Int
///         get() { }
///         set
/// }
/// ```
pub fn service() -> ResolvedModule {
    let mut builder = ModuleBuilder::new();
    let deprecated = builder.annotation("kotlin/Deprecated", &["\"use Worker\""]);
    let service = builder.add_class(
        Container::Package("app"),
        "Service",
        ClassConfig {
            modality: Some(Modality::Open),
            annotations: vec![deprecated],
            ..ClassConfig::default()
        },
    );
    let start = builder.add_function(
        Container::Class(service),
        "start",
        FunctionConfig {
            has_body: true,
            ..FunctionConfig::default()
        },
    );
    builder.add_class(Container::Body(start), "Job", ClassConfig::default());

    let int = builder.ty("kotlin/Int");
    let state = builder.add_property(
        Container::Class(service),
        "state",
        int,
        PropertyConfig {
            is_var: true,
            ..PropertyConfig::default()
        },
    );
    builder.add_getter(
        state,
        AccessorConfig {
            has_body: true,
            ..AccessorConfig::default()
        },
    );
    builder.add_setter(state, AccessorConfig::default());

    builder.finish()
}
