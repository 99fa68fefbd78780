//! Ordered signer list attached to a document.
//!
//! Signer positions are 1-based and gapless: after every add, remove or
//! reorder, `signers[i].order == i + 1`. Lookups that miss (unknown id,
//! out-of-range index) leave the list untouched and are reported through the
//! return value rather than as errors.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A person expected to sign one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    pub id: String,
    pub name: String,
    pub email: String,
    /// 1-based signing position.
    pub order: u32,
}

/// Partial update of a signer's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl SignerUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: None,
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: Some(email.into()),
        }
    }
}

/// Signers of one document, kept in signing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerList {
    signers: Vec<Signer>,
}

impl SignerList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a signer at the next position and return it.
    pub fn add(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> &Signer {
        let signer = Signer {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            order: self.signers.len() as u32 + 1,
        };
        self.signers.push(signer);
        &self.signers[self.signers.len() - 1]
    }

    /// Change a signer's name and/or email. Id and order are never touched.
    ///
    /// Returns false if no signer has the given id.
    pub fn update(&mut self, signer_id: &str, update: SignerUpdate) -> bool {
        let Some(signer) = self.signers.iter_mut().find(|s| s.id == signer_id) else {
            return false;
        };
        if let Some(name) = update.name {
            signer.name = name;
        }
        if let Some(email) = update.email {
            signer.email = email;
        }
        true
    }

    /// Remove a signer and close the gap it leaves.
    pub fn remove(&mut self, signer_id: &str) -> Option<Signer> {
        let index = self.signers.iter().position(|s| s.id == signer_id)?;
        let removed = self.signers.remove(index);
        self.renumber();
        Some(removed)
    }

    /// Move the signer at `from` to `to`, shifting the others.
    ///
    /// Either index being negative or past the end makes this a no-op.
    /// Returns whether anything moved.
    pub fn reorder(&mut self, from: isize, to: isize) -> bool {
        let len = self.signers.len() as isize;
        if from < 0 || from >= len || to < 0 || to >= len {
            return false;
        }
        let moved = self.signers.remove(from as usize);
        self.signers.insert(to as usize, moved);
        self.renumber();
        true
    }

    pub fn get(&self, signer_id: &str) -> Option<&Signer> {
        self.signers.iter().find(|s| s.id == signer_id)
    }

    pub fn as_slice(&self) -> &[Signer] {
        &self.signers
    }

    fn renumber(&mut self) {
        for (idx, signer) in self.signers.iter_mut().enumerate() {
            signer.order = idx as u32 + 1;
        }
    }
}

impl Deref for SignerList {
    type Target = [Signer];

    fn deref(&self) -> &[Signer] {
        &self.signers
    }
}

impl<'a> IntoIterator for &'a SignerList {
    type Item = &'a Signer;
    type IntoIter = std::slice::Iter<'a, Signer>;

    fn into_iter(self) -> Self::IntoIter {
        self.signers.iter()
    }
}
