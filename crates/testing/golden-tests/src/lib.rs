//! Golden-file rendering of whole modules
//!
//! [`render_module`] produces the text compared against the `tests/data`
//! artifacts; [`fixtures`] builds the modules those artifacts describe.

pub mod fixtures;

use ql_decl::{DeclId, DeclarationScope, DeclarationVisitor, ResolutionSession, ResolvedModule};
use ql_render::{DeclarationRenderer, RenderError, RendererOptions};
use tracing::debug;

/// Renders every declaration of `module`, one non-empty rendering per line
///
/// Declarations are visited in pre-order (classes, members, type parameters,
/// value parameters, accessors, constructors and local declarations), each
/// rendered as seen from its containing declaration.
///
/// # Errors
/// Propagates the first structural error of the renderer.
pub fn render_module(module: &ResolvedModule, options: &RendererOptions) -> Result<String, RenderError> {
    let mut walker = ModuleWalker {
        module,
        options,
        output: String::new(),
        rendered: 0,
    };
    walker.visit_all(module.roots(), DeclarationScope::default())?;
    debug!(declarations = walker.rendered, "module rendered");
    Ok(walker.output)
}

struct ModuleWalker<'a> {
    module: &'a ResolvedModule,
    options: &'a RendererOptions,
    output: String,
    rendered: usize,
}

impl<'a> DeclarationVisitor<'a> for ModuleWalker<'a> {
    type Error = RenderError;

    fn session(&self) -> &'a dyn ResolutionSession {
        self.module
    }

    fn visit_declaration(&mut self, id: DeclId, scope: DeclarationScope) -> Result<(), RenderError> {
        let text = DeclarationRenderer::render(self.module, id, scope.containing, self.options)?;
        // Enum entries without a body render to nothing
        if !text.is_empty() {
            self.output.push_str(&text);
            self.output.push('\n');
            self.rendered += 1;
        }

        let declaration = self.module.declaration(id);
        self.visit_declaration_kind(id, declaration, scope)
    }
}
