//! Client use-case service.
//!
//! # Invariants
//! - Renaming a client rewrites the denormalized client name on its tasks.
//! - Batch updates and deletes either apply to every id or to none.
//! - Bulk import never creates a second client with an existing name
//!   (case-insensitive), including duplicates inside the same batch.

use crate::model::client::{Client, ClientId};
use crate::model::task::contains_ignore_case;
use crate::model::ValidationError;
use crate::repo::client_repo::ClientRepository;
use crate::service::{ServiceError, ServiceResult};
use log::info;
use std::collections::HashSet;

/// Outcome of a client bulk import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientImportSummary {
    pub imported: Vec<ClientId>,
    /// Names skipped because a client with that name already exists.
    pub skipped_duplicates: Vec<String>,
}

/// Client service facade over the client repository.
pub struct ClientService<C: ClientRepository> {
    clients: C,
}

impl<C: ClientRepository> ClientService<C> {
    pub fn new(clients: C) -> Self {
        Self { clients }
    }

    pub fn list_clients(&self) -> ServiceResult<Vec<Client>> {
        Ok(self.clients.list_clients()?)
    }

    pub fn get_client(&self, id: ClientId) -> ServiceResult<Client> {
        self.clients
            .get_client(id)?
            .ok_or_else(|| ServiceError::not_found("client", id))
    }

    /// Clients whose name, GSTIN or PAN contains `term` (case-insensitive).
    /// A blank term lists every client.
    pub fn search_clients(&self, term: &str) -> ServiceResult<Vec<Client>> {
        let term = term.trim();
        let clients = self.clients.list_clients()?;
        if term.is_empty() {
            return Ok(clients);
        }
        Ok(clients
            .into_iter()
            .filter(|client| {
                contains_ignore_case(&client.name, term)
                    || client
                        .gstin
                        .as_deref()
                        .is_some_and(|gstin| contains_ignore_case(gstin, term))
                    || client
                        .pan
                        .as_deref()
                        .is_some_and(|pan| contains_ignore_case(pan, term))
            })
            .collect())
    }

    /// Adds every client as given, in one transaction.
    pub fn add_clients(&self, clients: &[Client]) -> ServiceResult<Vec<ClientId>> {
        let ids = self.clients.create_clients(clients)?;
        info!(
            "event=clients_add module=client status=ok count={}",
            ids.len()
        );
        Ok(ids)
    }

    /// Imports clients, skipping names that already exist.
    pub fn bulk_import_clients(&self, clients: &[Client]) -> ServiceResult<ClientImportSummary> {
        let mut known: HashSet<String> = self
            .clients
            .list_clients()?
            .into_iter()
            .map(|client| client.name.trim().to_lowercase())
            .collect();

        let mut accepted = Vec::new();
        let mut skipped_duplicates = Vec::new();
        for client in clients {
            client.validate()?;
            if known.insert(client.name.trim().to_lowercase()) {
                accepted.push(client.clone());
            } else {
                skipped_duplicates.push(client.name.trim().to_string());
            }
        }

        let imported = self.clients.create_clients(&accepted)?;
        info!(
            "event=clients_import module=client status=ok imported={} skipped={}",
            imported.len(),
            skipped_duplicates.len()
        );
        Ok(ClientImportSummary {
            imported,
            skipped_duplicates,
        })
    }

    /// Replaces one client record and propagates a rename to its tasks.
    pub fn update_client(&self, id: ClientId, client: &Client) -> ServiceResult<()> {
        let mut updated = client.clone();
        updated.id = id;
        let renamed = self.clients.update_client(&updated)?;
        if renamed > 0 {
            info!("event=client_rename module=client status=ok tasks={renamed}");
        }
        Ok(())
    }

    /// Pairs `ids[i]` with `clients[i]`; both slices must have equal length.
    pub fn update_clients(&self, ids: &[ClientId], clients: &[Client]) -> ServiceResult<()> {
        if ids.len() != clients.len() {
            return Err(ValidationError::Mismatch(format!(
                "{} client ids but {} client records",
                ids.len(),
                clients.len()
            ))
            .into());
        }
        let updated: Vec<Client> = ids
            .iter()
            .zip(clients)
            .map(|(id, client)| Client {
                id: *id,
                ..client.clone()
            })
            .collect();
        let renamed = self.clients.update_clients(&updated)?;
        info!(
            "event=clients_update module=client status=ok count={} renamed_tasks={renamed}",
            updated.len()
        );
        Ok(())
    }

    pub fn delete_client(&self, id: ClientId) -> ServiceResult<()> {
        self.clients.delete_client(id)?;
        Ok(())
    }

    pub fn delete_clients(&self, ids: &[ClientId]) -> ServiceResult<()> {
        self.clients.delete_clients(ids)?;
        info!(
            "event=clients_delete module=client status=ok count={}",
            ids.len()
        );
        Ok(())
    }
}
