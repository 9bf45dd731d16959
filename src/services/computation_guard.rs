// src/services/computation_guard.rs

use std::{
    collections::HashMap,
    hash::Hash,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

/// Descarta resultados obsoletos: cada nova computação de um slot invalida as
/// anteriores. Quem termina com bilhete antigo simplesmente não publica nada.
#[derive(Debug)]
pub struct ComputationGuard<K> {
    proximo: AtomicU64,
    correntes: Mutex<HashMap<K, u64>>,
}

impl<K> Default for ComputationGuard<K> {
    fn default() -> Self {
        Self { proximo: AtomicU64::new(1), correntes: Mutex::new(HashMap::new()) }
    }
}

/// Bilhete de uma computação em andamento. Ao ser descartado (inclusive
/// quando o future que o segura é cancelado) libera o slot, se ainda for dele.
#[derive(Debug)]
pub struct Ticket<'g, K: Eq + Hash + Clone> {
    guard: &'g ComputationGuard<K>,
    slot: K,
    numero: u64,
}

impl<K: Eq + Hash + Clone> Ticket<'_, K> {
    pub fn is_current(&self) -> bool {
        self.guard.slots().get(&self.slot) == Some(&self.numero)
    }

    /// Fecha a computação. Devolve `false` se ela já tinha sido superada;
    /// nesse caso o slot continua pertencendo à mais recente.
    pub fn concluir(self) -> bool {
        self.guard.liberar(&self.slot, self.numero)
    }
}

impl<K: Eq + Hash + Clone> Drop for Ticket<'_, K> {
    fn drop(&mut self) {
        self.guard.liberar(&self.slot, self.numero);
    }
}

impl<K: Eq + Hash + Clone> ComputationGuard<K> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // Um painel que entrou em pânico no meio de um cálculo não deve travar os outros
    fn slots(&self) -> MutexGuard<'_, HashMap<K, u64>> {
        self.correntes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Remove o slot só se o número ainda for o corrente
    fn liberar(&self, slot: &K, numero: u64) -> bool {
        let mut slots = self.slots();
        if slots.get(slot) == Some(&numero) {
            slots.remove(slot);
            true
        } else {
            false
        }
    }

    /// Abre uma nova computação para o slot, superando qualquer uma em andamento.
    pub fn iniciar(&self, slot: &K) -> Ticket<'_, K> {
        let numero = self.proximo.fetch_add(1, Ordering::Relaxed);
        self.slots().insert(slot.clone(), numero);
        Ticket { guard: self, slot: slot.clone(), numero }
    }

    pub fn em_andamento(&self) -> usize {
        self.slots().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older() {
        let guard = ComputationGuard::<&str>::new();
        let antigo = guard.iniciar(&"4512/2024-03/27");
        let novo = guard.iniciar(&"4512/2024-03/27");

        assert!(!antigo.is_current());
        assert!(novo.is_current());
        assert!(!antigo.concluir());
        assert_eq!(guard.em_andamento(), 1);
        assert!(novo.concluir());
        assert_eq!(guard.em_andamento(), 0);
    }

    #[test]
    fn slots_are_independent() {
        let guard = ComputationGuard::<u32>::new();
        let a = guard.iniciar(&1);
        let b = guard.iniciar(&2);
        assert!(a.is_current());
        assert!(b.is_current());
    }

    #[test]
    fn dropped_ticket_frees_its_slot() {
        let guard = ComputationGuard::<u32>::new();
        {
            let _cancelado = guard.iniciar(&7);
            assert_eq!(guard.em_andamento(), 1);
        }
        assert_eq!(guard.em_andamento(), 0);
    }

    #[test]
    fn dropping_a_superseded_ticket_keeps_the_newer_one() {
        let guard = ComputationGuard::<u32>::new();
        let antigo = guard.iniciar(&7);
        let novo = guard.iniciar(&7);
        drop(antigo);
        assert!(novo.is_current());
        assert_eq!(guard.em_andamento(), 1);
    }
}
