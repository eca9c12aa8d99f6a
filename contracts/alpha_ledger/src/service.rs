//! # Desk
//!
//! The service object every entry point goes through. One call to
//! [`Desk::apply`] is one load -> mutate -> save cycle:
//!
//! 1. load the record from the [`PersistenceGateway`] (or start fresh),
//! 2. run a pure transition against it,
//! 3. on success bump `version`, save the whole record and emit exactly one
//!    [`Notification`]; on error save nothing.
//!
//! A stored record that no longer decodes is discarded: the desk logs it,
//! emits `RecordReset` and carries on from a fresh record.

use soroban_sdk::{log, Env};

use crate::gateway::{Notification, NotificationSink, PersistenceGateway};
use crate::types::{AccountRecord, InvestorProfile};
use crate::Error;

pub struct Desk<'a, G, N> {
    env: &'a Env,
    profile: InvestorProfile,
    gateway: G,
    sink: N,
}

impl<'a, G, N> Desk<'a, G, N>
where
    G: PersistenceGateway,
    N: NotificationSink,
{
    pub fn new(env: &'a Env, profile: InvestorProfile, gateway: G, sink: N) -> Self {
        Desk {
            env,
            profile,
            gateway,
            sink,
        }
    }

    pub fn profile(&self) -> &InvestorProfile {
        &self.profile
    }

    /// Current record, falling back to a fresh one when nothing usable is
    /// stored.
    pub fn snapshot(&self) -> Result<AccountRecord, Error> {
        match self.gateway.load() {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Ok(AccountRecord::fresh(self.env, &self.profile)),
            Err(Error::MalformedRecord) => {
                log!(self.env, "account record failed to decode; starting fresh");
                self.sink.notify(Notification::RecordReset);
                Ok(AccountRecord::fresh(self.env, &self.profile))
            }
            Err(e) => Err(e),
        }
    }

    /// Run `op` against the current record and persist the result.
    pub fn apply<T, F>(&self, op: F) -> Result<T, Error>
    where
        F: FnOnce(&Env, &mut AccountRecord) -> Result<(T, Notification), Error>,
    {
        let mut record = self.snapshot()?;
        let (out, notification) = op(self.env, &mut record)?;
        record.version = record.version.checked_add(1).ok_or(Error::Overflow)?;
        self.gateway.save(&record);
        self.sink.notify(notification);
        Ok(out)
    }

    /// Persist a fresh record, replacing whatever is stored.
    pub fn reset(&self) -> AccountRecord {
        let record = AccountRecord::fresh(self.env, &self.profile);
        self.gateway.save(&record);
        record
    }
}
