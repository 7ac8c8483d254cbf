//! Mask binding keyed by field id.
//!
//! After every content swap the navigation layer broadcasts a content-ready
//! notification; the binder is re-run against whatever form fields now exist.
//! Binding is idempotent - a field already bound keeps its original mask, so
//! redelivery can never double-register.

use std::collections::BTreeMap;

use crate::mask;

/// The mask applied to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskKind {
    Cpf,
    Cnpj,
    Telefone,
    Cep,
    Data,
    Hora,
    Moeda,
    Numero,
    Letra,
    Nome,
    Cartao,
    Rg,
}

impl MaskKind {
    /// Apply this mask to raw input.
    pub fn apply(&self, input: &str) -> String {
        match self {
            MaskKind::Cpf => mask::cpf(input),
            MaskKind::Cnpj => mask::cnpj(input),
            MaskKind::Telefone => mask::telefone(input),
            MaskKind::Cep => mask::cep(input),
            MaskKind::Data => mask::data(input),
            MaskKind::Hora => mask::hora(input),
            MaskKind::Moeda => mask::moeda(input),
            MaskKind::Numero => mask::digits_only(input),
            MaskKind::Letra => mask::letters_only(input),
            MaskKind::Nome => mask::nome(input),
            MaskKind::Cartao => mask::cartao(input),
            MaskKind::Rg => mask::rg(input),
        }
    }

    /// The mask conventionally attached to a field id, if any.
    pub fn for_id(id: &str) -> Option<Self> {
        match id {
            "cpf" => Some(Self::Cpf),
            "cnpj" => Some(Self::Cnpj),
            "telefone" | "celular" => Some(Self::Telefone),
            "cep" => Some(Self::Cep),
            "nome" => Some(Self::Nome),
            "cartao" => Some(Self::Cartao),
            "rg" => Some(Self::Rg),
            _ => None,
        }
    }
}

/// Registry of field id → mask bindings.
#[derive(Debug, Default)]
pub struct MaskBinder {
    bindings: BTreeMap<String, MaskKind>,
}

impl MaskBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a mask to a field id. Returns `false` (and keeps the existing
    /// binding) if the field is already bound.
    pub fn bind(&mut self, id: impl Into<String>, kind: MaskKind) -> bool {
        let id = id.into();
        if self.bindings.contains_key(&id) {
            tracing::debug!("field {} already bound, skipping", id);
            return false;
        }
        self.bindings.insert(id, kind);
        true
    }

    /// Bind the conventional masks for a set of field ids, skipping ids with
    /// no conventional mask and ids already bound. Returns how many new
    /// bindings were made.
    pub fn bind_defaults<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> usize {
        ids.into_iter()
            .filter_map(|id| MaskKind::for_id(id).map(|kind| (id, kind)))
            .filter(|(id, kind)| self.bind(*id, *kind))
            .count()
    }

    /// Apply the bound mask to a field's raw input; `None` if unbound.
    pub fn apply(&self, id: &str, input: &str) -> Option<String> {
        self.bindings.get(id).map(|kind| kind.apply(input))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
