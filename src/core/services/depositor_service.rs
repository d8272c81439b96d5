//! Validated CRUD for depositors, plus postal-code autofill.

use uuid::Uuid;

use crate::cep::{Cep, CepLookup};
use crate::core::services::{ServiceError, ServiceResult};
use crate::core::workspace::Workspace;
use crate::domain::depositor::{normalize_tax_id, Depositor, MIN_DISPLAY_NAME_LEN};
use crate::storage::DataStore;

pub struct DepositorService;

impl DepositorService {
    pub fn add(
        store: &dyn DataStore,
        workspace: &mut Workspace,
        mut depositor: Depositor,
    ) -> ServiceResult<Uuid> {
        Self::validate(&mut depositor)?;
        store.insert_depositor(&depositor)?;
        Ok(workspace.add_depositor(depositor))
    }

    pub fn update<F>(
        store: &dyn DataStore,
        workspace: &mut Workspace,
        id: Uuid,
        mutator: F,
    ) -> ServiceResult<()>
    where
        F: FnOnce(&mut Depositor),
    {
        let index = workspace
            .depositor_index(id)
            .ok_or_else(|| ServiceError::Invalid("Depositor not found".into()))?;
        let mut updated = workspace.depositors[index].clone();
        mutator(&mut updated);
        updated.id = id;
        Self::validate(&mut updated)?;
        updated.touch();
        store.update_depositor(&updated)?;
        workspace.depositors[index] = updated;
        Ok(())
    }

    /// Removes the depositor. Bills referencing it are left alone: they keep
    /// the counterparty name snapshot taken at creation.
    pub fn remove(
        store: &dyn DataStore,
        workspace: &mut Workspace,
        id: Uuid,
    ) -> ServiceResult<Depositor> {
        if workspace.depositor(id).is_none() {
            return Err(ServiceError::Invalid("Depositor not found".into()));
        }
        store.delete_depositor(id)?;
        let index = workspace
            .depositor_index(id)
            .ok_or_else(|| ServiceError::Invalid("Depositor not found".into()))?;
        Ok(workspace.depositors.remove(index))
    }

    /// Resolves `cep` through the lookup collaborator and, on a hit, applies
    /// the full address to the depositor in one update. Returns whether the
    /// code was found.
    pub fn autofill_address(
        store: &dyn DataStore,
        workspace: &mut Workspace,
        id: Uuid,
        lookup: &dyn CepLookup,
        cep: &Cep,
    ) -> ServiceResult<bool> {
        let Some(address) = lookup.lookup(cep)? else {
            return Ok(false);
        };
        Self::update(store, workspace, id, |depositor| {
            depositor.apply_address(cep, address);
        })?;
        Ok(true)
    }

    pub fn list(workspace: &Workspace) -> Vec<&Depositor> {
        workspace.depositors.iter().collect()
    }

    fn validate(depositor: &mut Depositor) -> ServiceResult<()> {
        if depositor.display_name.trim().chars().count() < MIN_DISPLAY_NAME_LEN {
            return Err(ServiceError::Invalid(format!(
                "Display name must have at least {} characters",
                MIN_DISPLAY_NAME_LEN
            )));
        }
        if let Some(cpf) = depositor.cpf.take() {
            let digits = normalize_tax_id(&cpf);
            depositor.cpf = (!digits.is_empty()).then_some(digits);
        }
        if let Some(cnpj) = depositor.cnpj.take() {
            let digits = normalize_tax_id(&cnpj);
            depositor.cnpj = (!digits.is_empty()).then_some(digits);
        }
        Ok(())
    }
}
