//! Company and user store.
//!
//! Companies and their users live in concurrent maps keyed by company.
//! Creating a company also creates its first admin user, so a company
//! is never left without someone who can configure rules.

use dashmap::DashMap;
use thiserror::Error;

use expensa_core::directory::{Company, Role, User};
use expensa_shared::{CompanyId, CurrencyCode, UserId};

/// Errors that can occur during directory operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// Company not found.
    #[error("Company {0} not found")]
    CompanyNotFound(CompanyId),

    /// A user with this email already exists in the company.
    #[error("A user with email {0} already exists in this company")]
    DuplicateEmail(String),

    /// The referenced manager is not a user of the company.
    #[error("Manager {0} not found in this company")]
    UnknownManager(UserId),
}

/// Input for creating a company.
#[derive(Debug, Clone)]
pub struct NewCompany {
    /// Company display name.
    pub name: String,
    /// Base currency all expenses are converted into.
    pub currency: CurrencyCode,
    /// Country the company operates in.
    pub country: String,
    /// Display name for the initial admin user.
    pub admin_name: String,
    /// Email for the initial admin user.
    pub admin_email: String,
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Company the user belongs to.
    pub company_id: CompanyId,
    /// Display name.
    pub name: String,
    /// Email, unique within the company.
    pub email: String,
    /// Directory role.
    pub role: Role,
    /// The user's manager, if any.
    pub manager_id: Option<UserId>,
}

/// Concurrent store for companies and their users.
#[derive(Debug, Default)]
pub struct DirectoryStore {
    companies: DashMap<CompanyId, Company>,
    users: DashMap<CompanyId, Vec<User>>,
}

impl DirectoryStore {
    /// Creates an empty directory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a company together with its initial admin user.
    pub fn create_company(&self, input: NewCompany) -> (Company, User) {
        let company = Company {
            id: CompanyId::new(),
            name: input.name,
            currency: input.currency,
            country: input.country,
        };
        let admin = User {
            id: UserId::new(),
            name: input.admin_name,
            email: input.admin_email,
            role: Role::Admin,
            manager_id: None,
            company_id: company.id,
        };

        self.users.insert(company.id, vec![admin.clone()]);
        self.companies.insert(company.id, company.clone());
        (company, admin)
    }

    /// Creates a user in an existing company.
    ///
    /// # Errors
    ///
    /// * `DirectoryError::CompanyNotFound` if the company does not exist
    /// * `DirectoryError::DuplicateEmail` if the email is already taken
    ///   within the company
    /// * `DirectoryError::UnknownManager` if `manager_id` does not
    ///   resolve to a user of the company
    pub fn create_user(&self, input: NewUser) -> Result<User, DirectoryError> {
        // Holding the company's user list for the whole check-then-insert
        // keeps duplicate-email races out.
        let mut users = self
            .users
            .get_mut(&input.company_id)
            .ok_or(DirectoryError::CompanyNotFound(input.company_id))?;

        if users
            .iter()
            .any(|user| user.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(DirectoryError::DuplicateEmail(input.email));
        }
        if let Some(manager_id) = input.manager_id
            && !users.iter().any(|user| user.id == manager_id)
        {
            return Err(DirectoryError::UnknownManager(manager_id));
        }

        let user = User {
            id: UserId::new(),
            name: input.name,
            email: input.email,
            role: input.role,
            manager_id: input.manager_id,
            company_id: input.company_id,
        };
        users.push(user.clone());
        Ok(user)
    }

    /// Returns the company, if it exists.
    #[must_use]
    pub fn company(&self, company_id: CompanyId) -> Option<Company> {
        self.companies.get(&company_id).map(|entry| entry.clone())
    }

    /// Returns a company user by id.
    #[must_use]
    pub fn find_user(&self, company_id: CompanyId, user_id: UserId) -> Option<User> {
        self.users
            .get(&company_id)?
            .iter()
            .find(|user| user.id == user_id)
            .cloned()
    }

    /// Returns all users of a company.
    #[must_use]
    pub fn list_users(&self, company_id: CompanyId) -> Vec<User> {
        self.users
            .get(&company_id)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }
}
