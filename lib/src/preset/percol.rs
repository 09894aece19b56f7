use async_trait::async_trait;

use super::Preset;
use super::PresetKind;

/// <https://github.com/mooz/percol>
///
/// Distributed through pip, so installing it is left to the user.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Percol;

#[async_trait]
impl Preset for Percol {
    fn kind(&self) -> PresetKind {
        PresetKind::Percol
    }
}
