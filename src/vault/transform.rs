//! DTO ↔ entity transformation around the repository.
//!
//! Sensitive fields are sealed (encrypt + base64) before every write and
//! opened (base64 + decrypt) after every read. Create and update echo the
//! caller's plaintext back instead of decrypting what was just written.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::crypto::FieldEncryptor;
use crate::db::{Record, Repository};
use crate::enums::DecryptFailurePolicy;
use crate::error::{Result, VaultError};
use crate::filter::{FilterResolver, FilterSpec};
use crate::model::{RecordKind, SensitiveFields};

/// The five caller-facing operations for one record kind.
pub struct RecordService<'v, E> {
    repo: Repository<'v, E>,
    resolver: FilterResolver,
    encryptor: Arc<dyn FieldEncryptor>,
    policy: DecryptFailurePolicy,
}

impl<'v, E: RecordKind> RecordService<'v, E> {
    /// Fails if the kind declares a sensitive field as searchable.
    pub fn new(
        repo: Repository<'v, E>,
        encryptor: Arc<dyn FieldEncryptor>,
        policy: DecryptFailurePolicy,
    ) -> Result<Self> {
        Ok(Self {
            repo,
            resolver: FilterResolver::for_record::<E>()?,
            encryptor,
            policy,
        })
    }

    pub fn resolver(&self) -> &FilterResolver {
        &self.resolver
    }

    pub fn with_policy(mut self, policy: DecryptFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve raw request parameters, then list.
    pub fn find_all<I, K, V>(&self, params: I) -> Result<Vec<E::Dto>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let spec = self.resolver.resolve(params)?;
        self.find_all_with(&spec)
    }

    /// List with an already-resolved filter.
    pub fn find_all_with(&self, spec: &FilterSpec) -> Result<Vec<E::Dto>> {
        let entities = self.repo.find_all(spec)?;
        let mut out: Vec<E::Dto> = Vec::with_capacity(entities.len());

        for mut entity in entities {
            match self.open(&mut entity) {
                Ok(()) => out.push(entity.into()),
                Err(err) => match self.policy {
                    DecryptFailurePolicy::Abort => return Err(err),
                    DecryptFailurePolicy::Skip => {
                        warn!(
                            kind = E::TABLE,
                            id = entity.meta().id,
                            error = %err,
                            "skipping record with unreadable sensitive field"
                        );
                    }
                },
            }
        }
        Ok(out)
    }

    pub fn find_by_id(&self, id: u64) -> Result<E::Dto> {
        let mut entity = self.repo.find_by_id(id)?;
        self.open(&mut entity)?;
        Ok(entity.into())
    }

    /// Always inserts; a caller-supplied id is ignored.
    pub fn create(&self, dto: E::Dto) -> Result<E::Dto> {
        let mut entity: E = dto.into();
        entity.meta_mut().id = 0;

        let plaintext = self.seal(&mut entity)?;
        let mut saved = self.repo.save(entity)?;
        restore(&mut saved, plaintext)?;

        debug!(kind = E::TABLE, id = saved.meta().id, "created");
        Ok(saved.into())
    }

    /// Replace every field of the active record `id`.
    pub fn update(&self, id: u64, dto: E::Dto) -> Result<E::Dto> {
        // surfaces NotFound before anything is encrypted
        self.repo.find_by_id(id)?;

        let mut entity: E = dto.into();
        entity.meta_mut().id = id;

        let plaintext = self.seal(&mut entity)?;
        let mut saved = self.repo.save(entity)?;
        restore(&mut saved, plaintext)?;

        debug!(kind = E::TABLE, id, "updated");
        Ok(saved.into())
    }

    /// Soft-delete; NotFound unless the record is active.
    pub fn delete(&self, id: u64) -> Result<()> {
        self.repo.delete(id)
    }

    /// Replace each sensitive field with its sealed form, returning the
    /// original plaintexts in `SENSITIVE_FIELDS` order.
    fn seal(&self, entity: &mut E) -> Result<Vec<String>> {
        let mut retained = Vec::with_capacity(E::SENSITIVE_FIELDS.len());
        for &field in E::SENSITIVE_FIELDS {
            let slot = sensitive_slot(entity, field)?;
            let sealed = self.encryptor.seal(slot)?;
            retained.push(std::mem::replace(slot, sealed));
        }
        Ok(retained)
    }

    fn open(&self, entity: &mut E) -> Result<()> {
        for &field in E::SENSITIVE_FIELDS {
            let slot = sensitive_slot(entity, field)?;
            *slot = self.encryptor.open(slot)?;
        }
        Ok(())
    }
}

fn restore<E: RecordKind>(entity: &mut E, plaintext: Vec<String>) -> Result<()> {
    for (&field, value) in E::SENSITIVE_FIELDS.iter().zip(plaintext) {
        *sensitive_slot(entity, field)? = value;
    }
    Ok(())
}

fn sensitive_slot<'e, E: Record + SensitiveFields>(
    entity: &'e mut E,
    field: &str,
) -> Result<&'e mut String> {
    entity.sensitive_field_mut(field).ok_or_else(|| {
        VaultError::Internal(format!(
            "{} declares sensitive field `{field}` without a mapping",
            E::TABLE
        ))
    })
}
