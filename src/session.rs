//! The application root: the books plus the store they are flushed to.

use anyhow::Result;

use crate::config::Config;
use crate::db::KeyValueStore;
use crate::ledger::Books;

pub(crate) struct Session {
    pub(crate) books: Books,
    pub(crate) config: Config,
    store: Box<dyn KeyValueStore>,
}

impl Session {
    /// Load the books from `store`.
    pub(crate) fn open(store: Box<dyn KeyValueStore>, config: Config) -> Result<Self> {
        let books = Books::load(store.as_ref())?;
        Ok(Self {
            books,
            config,
            store,
        })
    }

    /// Flush the full books back to the store. Call after every mutation.
    pub(crate) fn commit(&mut self) -> Result<()> {
        self.books.save(self.store.as_mut())
    }

    #[cfg(test)]
    pub(crate) fn in_memory(export_dir: std::path::PathBuf) -> Self {
        Self {
            books: Books::new(),
            config: Config::new(export_dir.clone(), export_dir, "info".into()),
            store: Box::new(std::collections::BTreeMap::<String, String>::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn reload(&self) -> Result<Books> {
        Books::load(self.store.as_ref())
    }
}
