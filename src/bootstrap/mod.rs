//! Reconciliation of live storage with the declared registry.

mod report;

pub use report::{ReconcileMode, ReconcileReport};

use crate::db::SchemaStore;
use crate::error::BootstrapError;
use crate::schema::{Registry, TableSchema};
use futures::future::{join_all, try_join_all};
use std::sync::Arc;
use tracing::{debug, info};

/// Brings a schema store in line with a registry.
#[derive(Debug, Clone)]
pub struct Bootstrapper {
    store: Arc<dyn SchemaStore>,
    registry: Registry,
}

impl Bootstrapper {
    pub fn new(store: Arc<dyn SchemaStore>, registry: Registry) -> Self {
        Self { store, registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Ensure every registry table exists.
    ///
    /// Without `force`, missing tables are created one at a time in
    /// dependency order and existing tables are left alone. With `force`,
    /// every table is dropped (failures ignored) and then recreated; no
    /// create starts before all drops have finished.
    ///
    /// # Errors
    /// Returns an error if the registry is invalid, or if inspecting or
    /// creating any table fails. Drop failures never surface.
    pub async fn reconcile(&self, force: bool) -> Result<ReconcileReport, BootstrapError> {
        self.registry.validate()?;
        let waves = self.registry.creation_waves()?;

        if force {
            self.force_reset(&waves).await
        } else {
            self.create_missing(&waves).await
        }
    }

    async fn create_missing(
        &self,
        waves: &[Vec<&'static TableSchema>],
    ) -> Result<ReconcileReport, BootstrapError> {
        let mut report = ReconcileReport::new(ReconcileMode::CreateMissing);

        for table in waves.iter().flatten() {
            let exists = self
                .store
                .has_table(table.name)
                .await
                .map_err(|source| BootstrapError::Inspect {
                    table: table.name.to_string(),
                    source,
                })?;

            if exists {
                debug!(table = table.name, "table exists, skipping");
                report.skipped.push(table.name);
            } else {
                self.create(table).await?;
                report.created.push(table.name);
            }
        }

        info!(
            created = report.created.len(),
            skipped = report.skipped.len(),
            "schema reconciled"
        );
        Ok(report)
    }

    async fn force_reset(
        &self,
        waves: &[Vec<&'static TableSchema>],
    ) -> Result<ReconcileReport, BootstrapError> {
        let mut report = ReconcileReport::new(ReconcileMode::ForceReset);
        info!(tables = self.registry.len(), "force reset: dropping all tables");

        // Dependents go first so a referenced table is never dropped under them.
        for wave in waves.iter().rev() {
            let results = join_all(wave.iter().map(|table| async move {
                (table.name, self.store.drop_table(table.name).await)
            }))
            .await;

            for (name, result) in results {
                match result {
                    Ok(()) => report.dropped.push(name),
                    Err(e) => debug!(table = name, error = %e, "drop failed, ignoring"),
                }
            }
        }

        for wave in waves {
            try_join_all(wave.iter().map(|table| self.create(table))).await?;
            report.created.extend(wave.iter().map(|table| table.name));
        }

        info!(
            dropped = report.dropped.len(),
            created = report.created.len(),
            "schema reset"
        );
        Ok(report)
    }

    async fn create(&self, table: &TableSchema) -> Result<(), BootstrapError> {
        self.store
            .create_table(table)
            .await
            .map_err(|source| BootstrapError::Create {
                table: table.name.to_string(),
                source,
            })?;
        info!(table = table.name, "created table");
        Ok(())
    }
}

/// Create or force-recreate the blog tables in `store`.
///
/// Callers run this once at startup, before issuing any data queries.
///
/// # Errors
/// See [`Bootstrapper::reconcile`].
pub async fn bootstrap_tables(
    store: Arc<dyn SchemaStore>,
    force: bool,
) -> Result<ReconcileReport, BootstrapError> {
    Bootstrapper::new(store, Registry::blog())
        .reconcile(force)
        .await
}
