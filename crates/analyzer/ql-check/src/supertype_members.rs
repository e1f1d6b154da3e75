//! Inherited member conflicts of concrete classes

use ql_decl::{
    ClassKind, DeclId, Declaration, DeclarationStatus, Modality, RegularClass, ResolutionSession,
    TypeRef, Visibility,
};
use ql_intern::Symbol;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::checker::{CheckerContext, RegularClassChecker};
use crate::diagnostic::{DiagnosticKind, DiagnosticReporter};

/// Checker for inherited members a class must override
///
/// Reports members that stay abstract in a concrete class, and members that
/// inherit several implementations (or an implementation and an abstract
/// declaration) from interfaces without an override in the class itself.
pub struct SupertypeMemberChecker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MemberKind {
    Function,
    Property,
}

/// Signature a member is matched by across the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MemberKey {
    kind: MemberKind,
    name: Symbol,
    has_receiver: bool,
    arity: usize,
}

#[derive(Debug, Clone, Copy)]
struct InheritedMember {
    owner: DeclId,
    owner_is_interface: bool,
    is_abstract: bool,
}

impl RegularClassChecker for SupertypeMemberChecker {
    fn name(&self) -> &str {
        "supertype-members"
    }

    fn check(
        &self,
        class_id: DeclId,
        class: &RegularClass,
        ctx: &CheckerContext<'_>,
        reporter: &mut dyn DiagnosticReporter,
    ) {
        if matches!(class.kind, ClassKind::Interface | ClassKind::AnnotationClass) {
            return;
        }
        let session = ctx.session;

        let declared: FxHashSet<MemberKey> = class
            .members
            .iter()
            .filter_map(|&member| member_key(session.declaration(member)).map(|(key, _)| key))
            .collect();

        let mut collector = InheritedMembers::new(session, class_id);
        collector.collect(&class.supertypes);

        for (key, members) in collector.groups {
            if declared.contains(&key) {
                continue;
            }
            let visible: Vec<InheritedMember> = members
                .iter()
                .filter(|member| {
                    !members.iter().any(|other| {
                        other.owner != member.owner && is_subclass(session, other.owner, member.owner)
                    })
                })
                .copied()
                .collect();

            if visible
                .iter()
                .any(|member| !member.is_abstract && !member.owner_is_interface)
            {
                continue;
            }
            let concrete = visible.iter().filter(|member| !member.is_abstract).count();
            let abstract_count = visible.len() - concrete;

            let kind = if concrete >= 2 {
                DiagnosticKind::ManyImplMemberNotImplemented
            } else if concrete == 1 && abstract_count >= 1 {
                DiagnosticKind::ManyInterfacesMemberNotImplemented
            } else if concrete == 0
                && abstract_count >= 1
                && !matches!(class.status.modality, Some(Modality::Abstract | Modality::Sealed))
            {
                DiagnosticKind::AbstractMemberNotImplemented
            } else {
                continue;
            };
            let name = session.interner().resolve(key.name).to_string();
            reporter.report(class.source, kind, Some(name));
        }
    }
}

/// Callable members of the supertypes, grouped by signature in order of appearance
struct InheritedMembers<'a> {
    session: &'a dyn ResolutionSession,
    visited: FxHashSet<DeclId>,
    seen: FxHashSet<DeclId>,
    index: FxHashMap<MemberKey, usize>,
    groups: Vec<(MemberKey, Vec<InheritedMember>)>,
}

impl<'a> InheritedMembers<'a> {
    fn new(session: &'a dyn ResolutionSession, class_id: DeclId) -> Self {
        let mut visited = FxHashSet::default();
        visited.insert(class_id);
        Self {
            session,
            visited,
            seen: FxHashSet::default(),
            index: FxHashMap::default(),
            groups: Vec::new(),
        }
    }

    fn collect(&mut self, supertypes: &[TypeRef]) {
        let session = self.session;
        for supertype in supertypes {
            let Some((owner, class)) = session.regular_class(&supertype.ty) else {
                trace!("unresolved supertype skipped");
                continue;
            };
            if !self.visited.insert(owner) {
                continue;
            }
            for &member in &class.members {
                let Some((key, status)) = member_key(session.declaration(member)) else {
                    continue;
                };
                if status.visibility.normalize() == Visibility::Private || !self.seen.insert(member) {
                    continue;
                }
                let inherited = InheritedMember {
                    owner,
                    owner_is_interface: class.is_interface(),
                    is_abstract: status.is_abstract(),
                };
                let slot = *self.index.entry(key).or_insert_with(|| {
                    self.groups.push((key, Vec::new()));
                    self.groups.len() - 1
                });
                self.groups[slot].1.push(inherited);
            }
            self.collect(&class.supertypes);
        }
    }
}

fn member_key(declaration: &Declaration) -> Option<(MemberKey, &DeclarationStatus)> {
    match declaration {
        Declaration::SimpleFunction(function) => Some((
            MemberKey {
                kind: MemberKind::Function,
                name: function.name,
                has_receiver: function.receiver.is_some(),
                arity: function.value_parameters.len(),
            },
            &function.status,
        )),
        Declaration::Property(property) => Some((
            MemberKey {
                kind: MemberKind::Property,
                name: property.name,
                has_receiver: property.receiver.is_some(),
                arity: 0,
            },
            &property.status,
        )),
        _ => None,
    }
}

/// Whether `ancestor` is a strict supertype of `class`
fn is_subclass(session: &dyn ResolutionSession, class: DeclId, ancestor: DeclId) -> bool {
    let mut visited = FxHashSet::default();
    let mut pending = vec![class];
    while let Some(current) = pending.pop() {
        let Some(current) = session.declaration(current).as_regular_class() else {
            continue;
        };
        for supertype in &current.supertypes {
            let Some((id, _)) = session.regular_class(&supertype.ty) else {
                continue;
            };
            if id == ancestor {
                return true;
            }
            if visited.insert(id) {
                pending.push(id);
            }
        }
    }
    false
}
