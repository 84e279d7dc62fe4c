//! Field-level access rules for employee records.
//!
//! Every read or write of an employee record, on both the REST surface and
//! the action dispatcher, goes through [`authorize`] before any row is
//! touched. The rules are pure functions of the caller and the target id so
//! the whole decision table can be tested without a database.

use crate::roles::Role;
use crate::types::EmployeeId;

/// The authenticated principal behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// A signed-in employee.
    Employee(EmployeeId),
    /// A trusted integration authenticated by API key (analytics, HR sync,
    /// chatbot). Services have no employee record of their own.
    Service(String),
}

/// An authenticated caller: who they are plus the role their token carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub subject: Subject,
    pub role: Role,
}

impl Caller {
    pub fn employee(id: EmployeeId, role: Role) -> Self {
        Self {
            subject: Subject::Employee(id),
            role,
        }
    }

    pub fn service(name: impl Into<String>, role: Role) -> Self {
        Self {
            subject: Subject::Service(name.into()),
            role,
        }
    }

    /// Whether `target` is the caller's own record. Services never own one.
    pub fn is_self(&self, target: EmployeeId) -> bool {
        matches!(self.subject, Subject::Employee(id) if id == target)
    }
}

/// Field classes of an employee record. Each class has its own rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    /// Non-confidential profile fields: names, contact, job title,
    /// department. The stored role name rides along on reads.
    Profile,
    /// Compensation. Confidential.
    Salary,
    /// The role assignment. Writable only through the dedicated role
    /// operation.
    Role,
}

/// Read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

/// How a denied request surfaces to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denied {
    /// The caller may not learn whether the target exists. Surfaces as
    /// NotFound on every surface so foreign ids cannot be probed.
    Hidden,
    /// The target is visible but the field or operation is not allowed.
    Forbidden,
}

/// Whether the caller may see that the target record exists at all: their
/// own record, or any record when the role is hr/manager/admin.
fn can_view(caller: &Caller, target: EmployeeId) -> bool {
    caller.is_self(target) || matches!(caller.role, Role::Hr | Role::Manager | Role::Admin)
}

/// Authorize one access to one field class of one employee record.
///
/// Visibility is checked first: a caller who may not view the target gets
/// [`Denied::Hidden`] for every field and kind, before any field rule runs.
/// Field rules only ever produce [`Denied::Forbidden`].
pub fn authorize(
    caller: &Caller,
    target: EmployeeId,
    field: EmployeeField,
    kind: AccessKind,
) -> Result<(), Denied> {
    if !can_view(caller, target) {
        return Err(Denied::Hidden);
    }

    let own = caller.is_self(target);
    let allowed = match (field, kind) {
        // Visible implies readable for non-confidential fields.
        (EmployeeField::Profile, AccessKind::Read) => true,
        (EmployeeField::Profile, AccessKind::Write) => {
            own || matches!(caller.role, Role::Hr | Role::Admin)
        }
        // Salary reads are a role privilege, never an ownership one: an
        // employee is not allowed to read their own stored salary.
        (EmployeeField::Salary, AccessKind::Read) => {
            matches!(caller.role, Role::Hr | Role::Manager | Role::Admin)
        }
        // HR adjusts other people's salaries, admin adjusts any including
        // their own. HR's own salary stays read-only; manager never writes.
        (EmployeeField::Salary, AccessKind::Write) => match caller.role {
            Role::Admin => true,
            Role::Hr => !own,
            Role::Employee | Role::Manager => false,
        },
        (EmployeeField::Role, AccessKind::Read) => true,
        (EmployeeField::Role, AccessKind::Write) => can_assign_role(caller),
    };

    if allowed {
        Ok(())
    } else {
        Err(Denied::Forbidden)
    }
}

/// Whether the caller may list or search the employee directory.
///
/// A collection has no single target to hide, so refusals here surface as
/// plain Forbidden rather than NotFound.
pub fn can_list_employees(caller: &Caller) -> bool {
    matches!(caller.role, Role::Hr | Role::Manager | Role::Admin)
}

/// Whether the caller may assign a non-default role, at creation or later.
pub fn can_assign_role(caller: &Caller) -> bool {
    matches!(caller.role, Role::Hr | Role::Admin)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use AccessKind::{Read, Write};
    use EmployeeField::{Profile, Salary};

    fn id(n: u128) -> EmployeeId {
        EmployeeId::from_u128(n)
    }

    fn caller(role: Role) -> Caller {
        Caller::employee(id(1), role)
    }

    const OWN: u128 = 1;
    const OTHER: u128 = 2;

    // -- plain employee ------------------------------------------------------

    #[test]
    fn employee_reads_and_writes_own_profile() {
        let c = caller(Role::Employee);
        assert_eq!(authorize(&c, id(OWN), Profile, Read), Ok(()));
        assert_eq!(authorize(&c, id(OWN), Profile, Write), Ok(()));
    }

    #[test]
    fn employee_cannot_see_other_records_at_all() {
        let c = caller(Role::Employee);
        assert_eq!(authorize(&c, id(OTHER), Profile, Read), Err(Denied::Hidden));
        assert_eq!(authorize(&c, id(OTHER), Profile, Write), Err(Denied::Hidden));
        // Visibility is decided before any field rule: a foreign salary read
        // is Hidden, not Forbidden.
        assert_eq!(authorize(&c, id(OTHER), Salary, Read), Err(Denied::Hidden));
        assert_eq!(authorize(&c, id(OTHER), Salary, Write), Err(Denied::Hidden));
    }

    #[test]
    fn employee_own_salary_is_forbidden_not_hidden() {
        let c = caller(Role::Employee);
        assert_eq!(authorize(&c, id(OWN), Salary, Read), Err(Denied::Forbidden));
        assert_eq!(authorize(&c, id(OWN), Salary, Write), Err(Denied::Forbidden));
    }

    #[test]
    fn employee_cannot_change_roles() {
        let c = caller(Role::Employee);
        assert_eq!(
            authorize(&c, id(OWN), EmployeeField::Role, Write),
            Err(Denied::Forbidden)
        );
        assert_eq!(
            authorize(&c, id(OTHER), EmployeeField::Role, Write),
            Err(Denied::Hidden)
        );
        assert!(!can_assign_role(&c));
    }

    #[test]
    fn employee_cannot_list_directory() {
        assert!(!can_list_employees(&caller(Role::Employee)));
    }

    // -- hr ------------------------------------------------------------------

    #[test]
    fn hr_reads_and_writes_any_profile() {
        let c = caller(Role::Hr);
        assert_eq!(authorize(&c, id(OWN), Profile, Write), Ok(()));
        assert_eq!(authorize(&c, id(OTHER), Profile, Read), Ok(()));
        assert_eq!(authorize(&c, id(OTHER), Profile, Write), Ok(()));
    }

    #[test]
    fn hr_reads_any_salary_but_writes_only_others() {
        let c = caller(Role::Hr);
        assert_eq!(authorize(&c, id(OWN), Salary, Read), Ok(()));
        assert_eq!(authorize(&c, id(OTHER), Salary, Read), Ok(()));
        assert_eq!(authorize(&c, id(OTHER), Salary, Write), Ok(()));
        assert_eq!(authorize(&c, id(OWN), Salary, Write), Err(Denied::Forbidden));
    }

    #[test]
    fn hr_assigns_roles_and_lists() {
        let c = caller(Role::Hr);
        assert_eq!(authorize(&c, id(OTHER), EmployeeField::Role, Write), Ok(()));
        assert!(can_assign_role(&c));
        assert!(can_list_employees(&c));
    }

    // -- manager -------------------------------------------------------------

    #[test]
    fn manager_reads_other_profiles_but_cannot_write_them() {
        let c = caller(Role::Manager);
        assert_eq!(authorize(&c, id(OTHER), Profile, Read), Ok(()));
        assert_eq!(
            authorize(&c, id(OTHER), Profile, Write),
            Err(Denied::Forbidden)
        );
        // Own record behaves like any employee's own record.
        assert_eq!(authorize(&c, id(OWN), Profile, Write), Ok(()));
    }

    #[test]
    fn manager_reads_salaries_but_never_writes() {
        let c = caller(Role::Manager);
        assert_eq!(authorize(&c, id(OWN), Salary, Read), Ok(()));
        assert_eq!(authorize(&c, id(OTHER), Salary, Read), Ok(()));
        assert_eq!(authorize(&c, id(OWN), Salary, Write), Err(Denied::Forbidden));
        assert_eq!(
            authorize(&c, id(OTHER), Salary, Write),
            Err(Denied::Forbidden)
        );
    }

    #[test]
    fn manager_cannot_assign_roles_but_lists() {
        let c = caller(Role::Manager);
        assert!(!can_assign_role(&c));
        assert!(can_list_employees(&c));
        assert_eq!(
            authorize(&c, id(OTHER), EmployeeField::Role, Write),
            Err(Denied::Forbidden)
        );
    }

    // -- admin ---------------------------------------------------------------

    #[test]
    fn admin_has_full_access_including_own_salary() {
        let c = caller(Role::Admin);
        assert_eq!(authorize(&c, id(OTHER), Profile, Write), Ok(()));
        assert_eq!(authorize(&c, id(OWN), Salary, Read), Ok(()));
        assert_eq!(authorize(&c, id(OWN), Salary, Write), Ok(()));
        assert_eq!(authorize(&c, id(OTHER), Salary, Write), Ok(()));
        assert_eq!(authorize(&c, id(OWN), EmployeeField::Role, Write), Ok(()));
        assert!(can_list_employees(&c));
    }

    // -- service callers -----------------------------------------------------

    #[test]
    fn service_caller_never_owns_a_record() {
        let c = Caller::service("analytics-service", Role::Manager);
        assert!(!c.is_self(id(OWN)));
        // Manager-role service: read everything, write nothing.
        assert_eq!(authorize(&c, id(OWN), Profile, Read), Ok(()));
        assert_eq!(authorize(&c, id(OWN), Salary, Read), Ok(()));
        assert_eq!(authorize(&c, id(OWN), Profile, Write), Err(Denied::Forbidden));
        assert_eq!(authorize(&c, id(OWN), Salary, Write), Err(Denied::Forbidden));
        assert!(can_list_employees(&c));
        assert!(!can_assign_role(&c));
    }

    #[test]
    fn service_with_employee_role_sees_nothing() {
        let c = Caller::service("chatbot-agent", Role::Employee);
        assert_eq!(authorize(&c, id(OWN), Profile, Read), Err(Denied::Hidden));
        assert!(!can_list_employees(&c));
    }
}
