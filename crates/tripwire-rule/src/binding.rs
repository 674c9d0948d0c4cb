//! The binding entity and the per-rule binding arena.
//!
//! One [`Binding`] exists per distinct identifier a rule references. A
//! binding is either `Direct`, owning its own state, or an `Alias`
//! forwarding all of it to a peer — the case where parameter discovery
//! finds that a textual local name and a positional parameter share
//! storage. Peers are referenced by stable id within the owning
//! [`Bindings`] collection, so there are no ownership cycles.
//!
//! Alias forwarding covers type, initializer, call-array offset, local
//! slot, and the updated flag. Name, kind, and the local-variable
//! descriptor stay on the alias itself.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::{debug, warn};
use tripwire_common::AliasError;

use crate::expression::Expression;
use crate::kind::BindingKind;
use crate::types::Type;

/// Stable handle to a binding within its owning [`Bindings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(u32);

impl BindingId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_raw(raw: u32) -> BindingId {
        BindingId(raw)
    }
}

/// Install-time lifecycle of a binding's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Declared,
    Resolved,
}

#[derive(Debug)]
pub(crate) struct DirectState {
    pub(crate) ty: Type,
    pub(crate) initializer: Option<Box<dyn Expression>>,
    /// Offset into the trigger-time snapshot array of call values.
    pub(crate) call_array_offset: u32,
    /// Offset into the generated method's local-variable storage.
    pub(crate) local_slot: u32,
    /// True once this binding appeared on the left of an assignment.
    pub(crate) updated: bool,
    pub(crate) stage: Stage,
}

#[derive(Debug)]
enum Repr {
    Direct(DirectState),
    Alias(BindingId),
}

/// A named value source in a rule.
#[derive(Debug)]
pub struct Binding {
    name: String,
    kind: BindingKind,
    /// Runtime representation tag, supplied when the binding is realized
    /// as a trigger-method local. Not forwarded through aliases.
    descriptor: Option<String>,
    repr: Repr,
}

impl Binding {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BindingKind {
        self.kind
    }
}

/// The rule's bindings, in declaration order.
#[derive(Debug, Default)]
pub struct Bindings {
    entries: IndexMap<String, Binding, FxBuildHasher>,
}

impl Bindings {
    pub fn new() -> Bindings {
        Bindings::default()
    }

    /// Declare a binding for `name`, classifying it from the name's form.
    ///
    /// Re-declaring an existing name returns the existing id untouched;
    /// duplicate detection is the rule parser's job.
    pub fn declare(
        &mut self,
        name: &str,
        ty: Type,
        initializer: Option<Box<dyn Expression>>,
    ) -> BindingId {
        if let Some(existing) = self.entries.get_index_of(name) {
            warn!(binding = name, "redeclaration ignored");
            return BindingId(existing as u32);
        }
        let kind = BindingKind::classify(name);
        let binding = Binding {
            name: name.to_string(),
            kind,
            descriptor: None,
            repr: Repr::Direct(DirectState {
                ty,
                initializer,
                call_array_offset: 0,
                local_slot: 0,
                updated: false,
                stage: Stage::Declared,
            }),
        };
        let (index, _) = self.entries.insert_full(name.to_string(), binding);
        debug!(binding = name, ?kind, "declared");
        BindingId(index as u32)
    }

    pub fn lookup(&self, name: &str) -> Option<BindingId> {
        self.entries.get_index_of(name).map(|i| BindingId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = BindingId> + '_ {
        (0..self.entries.len() as u32).map(BindingId)
    }

    /// Borrow an entry directly; name and kind live on the binding itself
    /// and never forward.
    pub fn get(&self, id: BindingId) -> &Binding {
        &self.entries[id.index()]
    }

    pub fn name(&self, id: BindingId) -> &str {
        &self.entries[id.index()].name
    }

    pub fn kind(&self, id: BindingId) -> BindingKind {
        self.entries[id.index()].kind
    }

    pub fn descriptor(&self, id: BindingId) -> Option<&str> {
        self.entries[id.index()].descriptor.as_deref()
    }

    pub fn set_descriptor(&mut self, id: BindingId, descriptor: impl Into<String>) {
        self.entries[id.index()].descriptor = Some(descriptor.into());
    }

    // Alias-forwarding accessors. Each resolves to the direct peer first,
    // so an alias holds no independent state for these fields.

    pub fn ty(&self, id: BindingId) -> &Type {
        &self.direct(self.target_of(id)).ty
    }

    /// Overwrite the type. Trusted callers only (local-variable slot
    /// discovery supplies the type it found in the method's debug info).
    pub fn set_ty(&mut self, id: BindingId, ty: Type) {
        let target = self.target_of(id);
        self.direct_mut(target).ty = ty;
    }

    pub fn initializer(&self, id: BindingId) -> Option<&dyn Expression> {
        self.direct(self.target_of(id)).initializer.as_deref()
    }

    /// Replace the initializer, returning the previous one.
    pub fn set_initializer(
        &mut self,
        id: BindingId,
        initializer: Box<dyn Expression>,
    ) -> Option<Box<dyn Expression>> {
        let target = self.target_of(id);
        self.direct_mut(target).initializer.replace(initializer)
    }

    pub fn call_array_offset(&self, id: BindingId) -> u32 {
        self.direct(self.target_of(id)).call_array_offset
    }

    pub fn set_call_array_offset(&mut self, id: BindingId, offset: u32) {
        let target = self.target_of(id);
        self.direct_mut(target).call_array_offset = offset;
    }

    pub fn local_slot(&self, id: BindingId) -> u32 {
        self.direct(self.target_of(id)).local_slot
    }

    pub fn set_local_slot(&mut self, id: BindingId, slot: u32) {
        let target = self.target_of(id);
        self.direct_mut(target).local_slot = slot;
    }

    pub fn is_updated(&self, id: BindingId) -> bool {
        self.direct(self.target_of(id)).updated
    }

    /// Record that this binding occurs on the left of an assignment.
    pub fn set_updated(&mut self, id: BindingId) {
        let target = self.target_of(id);
        self.direct_mut(target).updated = true;
    }

    pub fn is_resolved(&self, id: BindingId) -> bool {
        self.direct(self.target_of(id)).stage == Stage::Resolved
    }

    /// Forward all state access from `id` to `target`.
    ///
    /// Legal only on local-variable bindings; the updated flag is or-ed
    /// forward onto the target, never cleared. The target is resolved to
    /// its direct peer first, so chains stay one level deep and cycles
    /// cannot form.
    pub fn alias_to(&mut self, id: BindingId, target: BindingId) -> Result<(), AliasError> {
        let kind = self.kind(id);
        if !kind.is_local_var() {
            warn!(
                binding = self.name(id),
                %kind,
                "attempt to alias non-local binding"
            );
            return Err(AliasError::NotLocal {
                name: self.name(id).to_string(),
                kind: kind.to_string(),
            });
        }
        if target.index() >= self.entries.len() {
            return Err(AliasError::UnknownTarget(self.name(id).to_string()));
        }
        let target = self.target_of(target);
        if target == id {
            return Err(AliasError::SelfAlias(self.name(id).to_string()));
        }
        let was_updated = self.is_updated(id);
        self.entries[id.index()].repr = Repr::Alias(target);
        if was_updated {
            self.direct_mut(target).updated = true;
        }
        debug!(
            binding = self.name(id),
            target = self.name(target),
            "aliased"
        );
        Ok(())
    }

    pub fn is_alias(&self, id: BindingId) -> bool {
        matches!(self.entries[id.index()].repr, Repr::Alias(_))
    }

    pub fn alias_target(&self, id: BindingId) -> Option<BindingId> {
        match self.entries[id.index()].repr {
            Repr::Alias(target) => Some(target),
            Repr::Direct(_) => None,
        }
    }

    /// Canonical rendering: `name[ : type][ = initializer]`.
    pub fn render(&self, id: BindingId) -> String {
        let mut out = String::new();
        out.push_str(self.name(id));
        let ty = self.ty(id);
        if ty.is_defined() || ty.is_object() {
            out.push_str(" : ");
            out.push_str(&ty.to_string());
        }
        if let Some(init) = self.initializer(id) {
            out.push_str(" = ");
            init.write_to(&mut out);
        }
        out
    }

    pub(crate) fn target_of(&self, id: BindingId) -> BindingId {
        let mut current = id;
        while let Repr::Alias(next) = self.entries[current.index()].repr {
            current = next;
        }
        current
    }

    pub(crate) fn direct(&self, id: BindingId) -> &DirectState {
        match &self.entries[id.index()].repr {
            Repr::Direct(state) => state,
            // target_of always lands on a direct entry.
            Repr::Alias(_) => unreachable!("alias not resolved to its direct peer"),
        }
    }

    pub(crate) fn direct_mut(&mut self, id: BindingId) -> &mut DirectState {
        match &mut self.entries[id.index()].repr {
            Repr::Direct(state) => state,
            Repr::Alias(_) => unreachable!("alias not resolved to its direct peer"),
        }
    }
}
