//! Index dérivés d'un brin: sommes préfixes GC et appartenance aux îlots CpG

use crate::sequence::{Sequence, Strand};

/// Taille de fenêtre par défaut pour la détection des îlots CpG
pub const DEFAULT_CPG_WINDOW: usize = 200;

/// GC% minimal d'une fenêtre d'îlot CpG
pub const CPG_MIN_GC_PERCENT: f64 = 50.0;

/// Ratio CpG observé/attendu minimal d'une fenêtre d'îlot CpG
pub const CPG_MIN_OBS_EXP_RATIO: f64 = 0.6;

/// Comptes GC cumulés: `counts[i]` = nombre de G/C dans `bases[0..i]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcPrefixArray {
    counts: Vec<u32>,
}

impl GcPrefixArray {
    /// Construit le tableau en une seule passe
    pub fn build(bases: &[u8]) -> Self {
        let mut counts = Vec::with_capacity(bases.len() + 1);
        let mut running = 0u32;
        counts.push(running);

        for &base in bases {
            if base == b'G' || base == b'C' {
                running += 1;
            }
            counts.push(running);
        }

        Self { counts }
    }

    /// Nombre de bases couvertes
    pub fn len(&self) -> usize {
        self.counts.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nombre de G/C dans `[start, end)`
    #[inline]
    pub fn count(&self, start: usize, end: usize) -> u32 {
        self.counts[end] - self.counts[start]
    }

    /// GC% de `[start, end)` en O(1), 0 pour une région vide
    #[inline]
    pub fn percentage(&self, start: usize, end: usize) -> f64 {
        let length = end - start;
        if length == 0 {
            return 0.0;
        }
        (self.count(start, end) as f64 / length as f64) * 100.0
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }
}

#[inline]
const fn bit_position(index: usize) -> (usize, u8) {
    (index >> 3, 1 << (index & 0x07))
}

/// Positions situées dans au moins une fenêtre d'îlot CpG (bitmap)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpgMembership {
    bits: Vec<u8>,
    len: usize,
}

impl CpgMembership {
    /// Ensemble vide couvrant `len` positions
    pub fn empty(len: usize) -> Self {
        Self {
            bits: vec![0; len.div_ceil(8)],
            len,
        }
    }

    /// Balaye chaque fenêtre `[i, i + window_size)` et marque celles qui
    /// passent les deux seuils
    ///
    /// Chaque fenêtre recompte ses C, G et CpG: coût O(N × fenêtre).
    pub fn build(bases: &[u8], gc: &GcPrefixArray, window_size: usize) -> Self {
        let mut membership = Self::empty(bases.len());
        if window_size == 0 || bases.len() < window_size {
            return membership;
        }

        for i in 0..=(bases.len() - window_size) {
            if gc.percentage(i, i + window_size) < CPG_MIN_GC_PERCENT {
                continue;
            }

            let region = &bases[i..i + window_size];
            let cpg_count = region.windows(2).filter(|w| w == b"CG").count();
            let c_count = region.iter().filter(|&&b| b == b'C').count();
            let g_count = region.iter().filter(|&&b| b == b'G').count();

            if c_count == 0 || g_count == 0 {
                continue;
            }

            let expected = (c_count * g_count) as f64 / window_size as f64;
            if cpg_count as f64 / expected >= CPG_MIN_OBS_EXP_RATIO {
                membership.mark_range(i, i + window_size);
            }
        }

        tracing::debug!(
            positions = membership.len,
            members = membership.count_members(),
            window_size,
            "Îlots CpG précalculés"
        );

        membership
    }

    fn mark_range(&mut self, start: usize, end: usize) {
        for index in start..end {
            let (byte, mask) = bit_position(index);
            self.bits[byte] |= mask;
        }
    }

    /// Vrai si la position appartient à un îlot (faux hors séquence)
    #[inline]
    pub fn contains(&self, position: usize) -> bool {
        if position >= self.len {
            return false;
        }
        let (byte, mask) = bit_position(position);
        self.bits[byte] & mask != 0
    }

    /// Nombre de positions couvertes par la bitmap
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Nombre de positions marquées
    pub fn count_members(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }
}

/// Tableaux dérivés d'un brin, construits une fois par recherche
#[derive(Debug, Clone)]
pub struct SequenceIndex {
    strand: Strand,
    bases: Vec<u8>,
    gc: GcPrefixArray,
    cpg: CpgMembership,
}

impl SequenceIndex {
    /// Indexe le brin demandé; le brin `-` est le complément inverse.
    /// Sans filtre CpG, l'appartenance reste vide.
    pub fn for_strand(sequence: &Sequence, strand: Strand, with_cpg: bool) -> Self {
        let bases = match strand {
            Strand::Forward => sequence.as_bytes().to_vec(),
            Strand::Reverse => sequence.reverse_complement().as_bytes().to_vec(),
        };
        Self::build(strand, bases, with_cpg)
    }

    fn build(strand: Strand, bases: Vec<u8>, with_cpg: bool) -> Self {
        let gc = GcPrefixArray::build(&bases);
        let cpg = if with_cpg {
            CpgMembership::build(&bases, &gc, DEFAULT_CPG_WINDOW)
        } else {
            CpgMembership::empty(bases.len())
        };

        Self {
            strand,
            bases,
            gc,
            cpg,
        }
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Bases du brin indexé, lues 5'→3'
    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    pub fn gc(&self) -> &GcPrefixArray {
        &self.gc
    }

    pub fn cpg(&self) -> &CpgMembership {
        &self.cpg
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}
