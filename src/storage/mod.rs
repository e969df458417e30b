//! Storage layer for PesoWise
//!
//! One JSON document per table under `data/`, held in memory while a
//! command runs and written back atomically. The `Storage` coordinator owns
//! every repository and the audit logger.

pub mod budgets;
pub mod file_io;
pub mod init;
pub mod profile;
pub mod repository;
pub mod tables;
pub mod transactions;
pub mod wallets;

pub use budgets::BudgetRepository;
pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use init::initialize_storage;
pub use profile::ProfileStore;
pub use repository::{Record, Repository};
pub use tables::{
    BillRepository, GoalRepository, InvestmentRepository, LoanRepository, NotificationRepository,
};
pub use transactions::TransactionRepository;
pub use wallets::WalletRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::PesoPaths;
use crate::error::{PesoError, PesoResult};

/// Tables that can be flushed individually
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Wallets,
    Transactions,
    Budgets,
    Bills,
    Loans,
    Goals,
    Investments,
    Notifications,
    Profile,
}

impl Table {
    pub const ALL: [Table; 9] = [
        Table::Wallets,
        Table::Transactions,
        Table::Budgets,
        Table::Bills,
        Table::Loans,
        Table::Goals,
        Table::Investments,
        Table::Notifications,
        Table::Profile,
    ];
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: PesoPaths,
    pub wallets: WalletRepository,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    pub bills: BillRepository,
    pub loans: LoanRepository,
    pub goals: GoalRepository,
    pub investments: InvestmentRepository,
    pub notifications: NotificationRepository,
    pub profile: ProfileStore,
    audit: AuditLogger,
}

impl Storage {
    pub fn new(paths: PesoPaths) -> Result<Self, PesoError> {
        paths.ensure_directories()?;

        Ok(Self {
            wallets: WalletRepository::new(paths.wallets_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            bills: BillRepository::new(paths.bills_file()),
            loans: LoanRepository::new(paths.loans_file()),
            goals: GoalRepository::new(paths.goals_file()),
            investments: InvestmentRepository::new(paths.investments_file()),
            notifications: NotificationRepository::new(paths.notifications_file()),
            profile: ProfileStore::new(paths.profile_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &PesoPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), PesoError> {
        self.wallets.load()?;
        self.transactions.load()?;
        self.budgets.load()?;
        self.bills.load()?;
        self.loans.load()?;
        self.goals.load()?;
        self.investments.load()?;
        self.notifications.load()?;
        self.profile.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PesoError> {
        self.flush(&Table::ALL)
    }

    fn save_table(&self, table: Table) -> Result<(), PesoError> {
        match table {
            Table::Wallets => self.wallets.save(),
            Table::Transactions => self.transactions.save(),
            Table::Budgets => self.budgets.save(),
            Table::Bills => self.bills.save(),
            Table::Loans => self.loans.save(),
            Table::Goals => self.goals.save(),
            Table::Investments => self.investments.save(),
            Table::Notifications => self.notifications.save(),
            Table::Profile => self.profile.save(),
        }
    }

    /// Write the given tables to disk
    ///
    /// When any write fails the in-memory state is reloaded from disk so it
    /// matches what was actually persisted, and the write error is returned.
    pub fn flush(&self, tables: &[Table]) -> Result<(), PesoError> {
        for &table in tables {
            if let Err(err) = self.save_table(table) {
                tracing::error!(?table, error = %err, "flush failed, reloading from disk");
                if let Err(reload_err) = self.load_all() {
                    tracing::error!(error = %reload_err, "reload after failed flush also failed");
                }
                return Err(match err {
                    PesoError::Storage(_) => err,
                    other => PesoError::Storage(other.to_string()),
                });
            }
        }
        Ok(())
    }

    /// Check if the data directory has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a create in the audit log
    pub fn log_create<T: Record>(&self, row: &T) -> PesoResult<()> {
        let entry = AuditEntry::create(T::ENTITY, row.id().to_string(), row.label(), row);
        self.audit.log(&entry)
    }

    /// Record an update in the audit log, with a field diff
    pub fn log_update<T: Record>(&self, before: &T, after: &T) -> PesoResult<()> {
        self.audit.log(&update_entry(before, after))
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Record>(&self, row: &T) -> PesoResult<()> {
        self.audit.log(&delete_entry(row))
    }

    /// Record a change to a record that has no id of its own (the profile)
    pub fn log_singleton_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        before: &T,
        after: &T,
    ) -> PesoResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        let entry = AuditEntry::update(
            entity_type,
            entity_type.to_string().to_lowercase(),
            None,
            before,
            after,
            diff,
        );
        self.audit.log(&entry)
    }

    /// Append several audit entries at once (import and bulk changes)
    pub fn log_batch(&self, entries: &[AuditEntry]) -> PesoResult<()> {
        self.audit.log_batch(entries)
    }
}

/// Audit entry for an update, with a field diff
pub fn update_entry<T: Record>(before: &T, after: &T) -> AuditEntry {
    let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
        (Ok(b), Ok(a)) => generate_diff(&b, &a),
        _ => None,
    };
    AuditEntry::update(
        T::ENTITY,
        after.id().to_string(),
        after.label(),
        before,
        after,
        diff,
    )
}

/// Audit entry for a delete
pub fn delete_entry<T: Record>(row: &T) -> AuditEntry {
    AuditEntry::delete(T::ENTITY, row.id().to_string(), row.label(), row)
}
