/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Atomic subshells and their ENDF and EADL designators
//!
//! Source tables identify subshells by integer designators. ENDF numbers
//! the subshells sequentially (K = 1, L1 = 2, ...) while EADL reserves
//! numbers for grouped subshells (L = 2, L23 = 4, ...), so the two schemes
//! only agree for K.

use super::errors::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Atomic subshell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subshell {
    K,
    L1,
    L2,
    L3,
    M1,
    M2,
    M3,
    M4,
    M5,
    N1,
    N2,
    N3,
    N4,
    N5,
    N6,
    N7,
    O1,
    O2,
    O3,
    O4,
    O5,
    O6,
    O7,
    O8,
    O9,
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
    P8,
    P9,
    P10,
    P11,
    Q1,
    Q2,
    Q3,
}

/// (subshell, EADL designator, name), ordered by ENDF designator
const SUBSHELL_TABLE: [(Subshell, u32, &str); 39] = [
    (Subshell::K, 1, "K"),
    (Subshell::L1, 3, "L1"),
    (Subshell::L2, 5, "L2"),
    (Subshell::L3, 6, "L3"),
    (Subshell::M1, 8, "M1"),
    (Subshell::M2, 10, "M2"),
    (Subshell::M3, 11, "M3"),
    (Subshell::M4, 13, "M4"),
    (Subshell::M5, 14, "M5"),
    (Subshell::N1, 16, "N1"),
    (Subshell::N2, 18, "N2"),
    (Subshell::N3, 19, "N3"),
    (Subshell::N4, 21, "N4"),
    (Subshell::N5, 22, "N5"),
    (Subshell::N6, 24, "N6"),
    (Subshell::N7, 25, "N7"),
    (Subshell::O1, 27, "O1"),
    (Subshell::O2, 29, "O2"),
    (Subshell::O3, 30, "O3"),
    (Subshell::O4, 32, "O4"),
    (Subshell::O5, 33, "O5"),
    (Subshell::O6, 35, "O6"),
    (Subshell::O7, 36, "O7"),
    (Subshell::O8, 38, "O8"),
    (Subshell::O9, 39, "O9"),
    (Subshell::P1, 41, "P1"),
    (Subshell::P2, 43, "P2"),
    (Subshell::P3, 44, "P3"),
    (Subshell::P4, 46, "P4"),
    (Subshell::P5, 47, "P5"),
    (Subshell::P6, 49, "P6"),
    (Subshell::P7, 50, "P7"),
    (Subshell::P8, 52, "P8"),
    (Subshell::P9, 53, "P9"),
    (Subshell::P10, 55, "P10"),
    (Subshell::P11, 56, "P11"),
    (Subshell::Q1, 58, "Q1"),
    (Subshell::Q2, 60, "Q2"),
    (Subshell::Q3, 61, "Q3"),
];

impl Subshell {
    /// Convert an ENDF designator (1 = K ... 39 = Q3)
    pub fn from_endf_designator(designator: u32) -> Result<Self> {
        if designator == 0 || designator as usize > SUBSHELL_TABLE.len() {
            return Err(DataError::UnknownSubshell(format!(
                "ENDF designator {} does not correspond to a subshell",
                designator
            )));
        }

        Ok(SUBSHELL_TABLE[designator as usize - 1].0)
    }

    /// Convert an EADL designator (1 = K, 3 = L1, 5 = L2, ...)
    pub fn from_eadl_designator(designator: u32) -> Result<Self> {
        SUBSHELL_TABLE
            .iter()
            .find(|(_, eadl, _)| *eadl == designator)
            .map(|(subshell, _, _)| *subshell)
            .ok_or_else(|| {
                DataError::UnknownSubshell(format!(
                    "EADL designator {} does not correspond to a subshell",
                    designator
                ))
            })
    }

    pub fn endf_designator(self) -> u32 {
        self.table_index() as u32 + 1
    }

    pub fn eadl_designator(self) -> u32 {
        SUBSHELL_TABLE[self.table_index()].1
    }

    pub fn name(self) -> &'static str {
        SUBSHELL_TABLE[self.table_index()].2
    }

    fn table_index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Subshell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Name of the subshell with an ENDF designator, or the raw number when the
/// designator is unknown
pub fn subshell_name(endf_designator: u32) -> String {
    Subshell::from_endf_designator(endf_designator)
        .map(|subshell| subshell.name().to_string())
        .unwrap_or_else(|_| endf_designator.to_string())
}
