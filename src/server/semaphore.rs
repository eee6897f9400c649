//! # Semáforo Contador
//! src/server/semaphore.rs
//!
//! Limita cuántos workers procesan conexiones a la vez en la variante
//! concurrente. El accept-loop NO se bloquea con el semáforo: las
//! conexiones se aceptan y el hilo del worker espera su permiso antes
//! de empezar a procesar (las conexiones de más quedan en el backlog
//! del sistema operativo).

use std::sync::{Condvar, Mutex};

/// Semáforo contador sobre `Mutex` + `Condvar`
#[derive(Debug)]
pub struct Semaphore {
    permits: Mutex<usize>,
    condvar: Condvar,
}

/// Permiso RAII: se devuelve al semáforo al salir de scope
#[derive(Debug)]
pub struct SemaphorePermit<'a> {
    semaphore: &'a Semaphore,
}

impl Semaphore {
    /// Crea un semáforo con `capacity` permisos disponibles
    pub fn new(capacity: usize) -> Self {
        Self {
            permits: Mutex::new(capacity),
            condvar: Condvar::new(),
        }
    }

    /// Adquiere un permiso, bloqueando si no hay ninguno disponible
    pub fn acquire(&self) -> SemaphorePermit<'_> {
        let mut permits = self.permits.lock().unwrap();
        while *permits == 0 {
            permits = self.condvar.wait(permits).unwrap();
        }
        *permits -= 1;
        SemaphorePermit { semaphore: self }
    }

    /// Permisos disponibles en este instante
    pub fn available(&self) -> usize {
        *self.permits.lock().unwrap()
    }

    fn release(&self) {
        let mut permits = self.permits.lock().unwrap();
        *permits += 1;
        self.condvar.notify_one();
    }
}

impl Drop for SemaphorePermit<'_> {
    fn drop(&mut self) {
        self.semaphore.release();
    }
}
