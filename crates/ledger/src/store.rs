use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use qimen::{Email, LedgerError, Points, PointsLedger, UserId};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Where the ledger lives and how many points it hands out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSettings {
    /// JSON file holding every account. Parent directories are created on
    /// first use.
    pub path: PathBuf,
    /// Balance of a freshly registered account.
    pub initial_points: Points,
    /// Award for the first sign-in of each civil day.
    pub daily_sign_in_points: Points,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".qimen/users.json"),
            initial_points: Points::new(30),
            daily_sign_in_points: Points::new(5),
        }
    }
}

/// Public view of a stored account. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: UserId,
    pub email: Email,
    pub points: Points,
    pub last_signin: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    id: UserId,
    email: Email,
    password: String,
    #[serde(default)]
    points: Points,
    #[serde(default, deserialize_with = "lenient_date")]
    last_signin: Option<NaiveDate>,
}

impl UserRecord {
    fn account(&self) -> Account {
        Account {
            id: self.id.clone(),
            email: self.email.clone(),
            points: self.points,
            last_signin: self.last_signin,
        }
    }
}

/// An unparseable sign-in date reads as "never signed in".
fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()))
}

type Records = BTreeMap<String, UserRecord>;

fn storage_error(path: &Path, err: impl std::fmt::Display) -> LedgerError {
    LedgerError::Storage {
        message: format!("{}: {err}", path.display()),
    }
}

/// Points ledger persisted as one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileLedger {
    settings: LedgerSettings,
}

impl JsonFileLedger {
    pub fn new(settings: LedgerSettings) -> Self {
        Self { settings }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.settings.path
    }

    fn ensure_storage(&self) -> Result<(), LedgerError> {
        let path = self.path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| storage_error(parent, e))?;
        }
        if !path.exists() {
            fs::write(path, "{}").map_err(|e| storage_error(path, e))?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Records, LedgerError> {
        self.ensure_storage()?;
        let path = self.path();
        let raw = fs::read_to_string(path).map_err(|e| storage_error(path, e))?;
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ledger file is corrupt; starting empty");
                Ok(Records::new())
            }
        }
    }

    fn save(&self, records: &Records) -> Result<(), LedgerError> {
        self.ensure_storage()?;
        let path = self.path();
        let json = serde_json::to_string_pretty(records).map_err(|e| storage_error(path, e))?;
        fs::write(path, json).map_err(|e| storage_error(path, e))
    }

    /// Loads, applies `f` to one user's record, and saves only if `f`
    /// succeeds.
    fn update<R>(
        &self,
        user: &UserId,
        f: impl FnOnce(&mut UserRecord) -> Result<R, LedgerError>,
    ) -> Result<R, LedgerError> {
        let mut records = self.load()?;
        let record = records
            .get_mut(user.as_str())
            .ok_or_else(|| LedgerError::UserNotFound { user: user.clone() })?;
        let result = f(record)?;
        self.save(&records)?;
        Ok(result)
    }

    /// Registers a new account with the configured starting balance.
    pub fn create_user(&self, email: &str, password: &str) -> Result<Account, LedgerError> {
        let email = Email::parse(email.trim()).ok_or_else(|| LedgerError::InvalidEmail {
            value: email.to_string(),
        })?;
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(LedgerError::WeakPassword {
                min_length: MIN_PASSWORD_LENGTH,
            });
        }

        let mut records = self.load()?;
        if records.values().any(|r| r.email == email) {
            return Err(LedgerError::EmailAlreadyRegistered { email });
        }

        let id = UserId::generate();
        let record = UserRecord {
            id: id.clone(),
            email,
            password: password.to_string(),
            points: self.settings.initial_points,
            last_signin: None,
        };
        let account = record.account();
        records.insert(id.as_str().to_string(), record);
        self.save(&records)?;

        info!(user = %id, "account created");
        Ok(account)
    }

    /// Returns the account whose e-mail and password both match.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Account, LedgerError> {
        self.load()?
            .values()
            .find(|r| r.email.as_str() == email.trim() && r.password == password)
            .map(UserRecord::account)
            .ok_or(LedgerError::InvalidCredentials)
    }

    /// Looks up one account.
    pub fn account(&self, user: &UserId) -> Result<Account, LedgerError> {
        self.load()?
            .get(user.as_str())
            .map(UserRecord::account)
            .ok_or_else(|| LedgerError::UserNotFound { user: user.clone() })
    }

    /// Awards the daily sign-in points once per civil day.
    ///
    /// `today` is the civil date in the reference zone; a second call with
    /// the same date fails with [`LedgerError::AlreadySignedIn`].
    pub fn daily_sign_in(&self, user: &UserId, today: NaiveDate) -> Result<Points, LedgerError> {
        let award = self.settings.daily_sign_in_points;
        let balance = self.update(user, |record| {
            if record.last_signin == Some(today) {
                return Err(LedgerError::AlreadySignedIn { day: today });
            }
            record.points += award;
            record.last_signin = Some(today);
            Ok(record.points)
        })?;
        info!(user = %user, %award, %balance, "daily sign-in awarded");
        Ok(balance)
    }
}

impl PointsLedger for JsonFileLedger {
    fn balance(&self, user: &UserId) -> Result<Points, LedgerError> {
        self.account(user).map(|a| a.points)
    }

    fn debit(&self, user: &UserId, amount: Points) -> Result<Points, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        let balance = self.update(user, |record| {
            let remaining =
                record
                    .points
                    .checked_sub(amount)
                    .ok_or(LedgerError::InsufficientPoints {
                        balance: record.points,
                        requested: amount,
                    })?;
            record.points = remaining;
            Ok(remaining)
        })?;
        debug!(user = %user, %amount, %balance, "points debited");
        Ok(balance)
    }

    fn credit(&self, user: &UserId, amount: Points) -> Result<Points, LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        let balance = self.update(user, |record| {
            record.points += amount;
            Ok(record.points)
        })?;
        debug!(user = %user, %amount, %balance, "points credited");
        Ok(balance)
    }
}
