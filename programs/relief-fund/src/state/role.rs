use anchor_lang::prelude::*;

use crate::state::{read_account, write_account, ReliefError};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    Auditor,
    Beneficiary,
}

impl Role {
    /// Single byte used in the role assignment PDA seeds.
    pub fn seed(self) -> [u8; 1] {
        [self as u8]
    }

    /// BENEFICIARY follows registration and cannot be granted or revoked directly.
    pub fn require_grantable(self) -> Result<()> {
        require!(self != Role::Beneficiary, ReliefError::ReservedRole);
        Ok(())
    }
}

#[account]
pub struct RoleAssignment {
    pub fund: Pubkey,
    pub role: Role,
    pub principal: Pubkey,
    pub active: bool,
    pub granted_by: Pubkey,
    pub granted_at: i64,
    pub bump: u8,
}

impl Space for RoleAssignment {
    const INIT_SPACE: usize = 8      // Discriminator
        + 32    // fund: Pubkey
        + 1     // role: Role
        + 32    // principal: Pubkey
        + 1     // active: bool
        + 32    // granted_by: Pubkey
        + 8     // granted_at: i64
        + 1;    // bump: u8
}

impl RoleAssignment {
    pub fn grants(&self, fund: &Pubkey, role: Role, principal: &Pubkey) -> bool {
        self.active && self.fund == *fund && self.role == role && self.principal == *principal
    }

    /// Returns `false` when the role was already held, leaving the record untouched.
    pub fn activate(
        &mut self,
        fund: Pubkey,
        role: Role,
        principal: Pubkey,
        granted_by: Pubkey,
        granted_at: i64,
        bump: u8,
    ) -> bool {
        if self.grants(&fund, role, &principal) {
            return false;
        }
        self.fund = fund;
        self.role = role;
        self.principal = principal;
        self.active = true;
        self.granted_by = granted_by;
        self.granted_at = granted_at;
        self.bump = bump;
        true
    }

    pub fn deactivate(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }
}

/// Whether `info` is an active assignment of `role` to `principal` in `fund`.
/// Missing or uninitialized accounts simply do not hold the role.
pub fn role_held(info: &AccountInfo, fund: &Pubkey, role: Role, principal: &Pubkey) -> Result<bool> {
    Ok(read_account::<RoleAssignment>(info)?
        .map(|assignment| assignment.grants(fund, role, principal))
        .unwrap_or(false))
}

pub fn require_role(info: &AccountInfo, fund: &Pubkey, role: Role, principal: &Pubkey) -> Result<()> {
    require!(role_held(info, fund, role, principal)?, ReliefError::Unauthorized);
    Ok(())
}

/// Deactivates the assignment behind `info`. Returns `false` when there was
/// nothing to revoke.
pub fn revoke_assignment(info: &AccountInfo) -> Result<bool> {
    let Some(mut assignment) = read_account::<RoleAssignment>(info)? else {
        return Ok(false);
    };
    if !assignment.deactivate() {
        return Ok(false);
    }
    write_account(info, &assignment)?;
    Ok(true)
}

#[event]
pub struct RoleGranted {
    pub fund: Pubkey,
    pub role: Role,
    pub principal: Pubkey,
    pub granted_by: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct RoleRevoked {
    pub fund: Pubkey,
    pub role: Role,
    pub principal: Pubkey,
    pub revoked_by: Pubkey,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> RoleAssignment {
        RoleAssignment {
            fund: Pubkey::default(),
            role: Role::Admin,
            principal: Pubkey::default(),
            active: false,
            granted_by: Pubkey::default(),
            granted_at: 0,
            bump: 0,
        }
    }

    #[test]
    fn seeds_are_distinct_per_role() {
        assert_eq!(Role::Admin.seed(), [0]);
        assert_eq!(Role::Auditor.seed(), [1]);
        assert_eq!(Role::Beneficiary.seed(), [2]);
    }

    #[test]
    fn grant_is_idempotent() {
        let (fund, admin, auditor) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let mut assignment = blank();

        assert!(assignment.activate(fund, Role::Auditor, auditor, admin, 10, 254));
        assert!(!assignment.activate(fund, Role::Auditor, auditor, Pubkey::new_unique(), 20, 254));

        assert!(assignment.grants(&fund, Role::Auditor, &auditor));
        assert_eq!(assignment.granted_by, admin);
        assert_eq!(assignment.granted_at, 10);
    }

    #[test]
    fn grants_checks_every_field() {
        let (fund, principal) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut assignment = blank();
        assignment.activate(fund, Role::Admin, principal, principal, 0, 1);

        assert!(!assignment.grants(&fund, Role::Auditor, &principal));
        assert!(!assignment.grants(&Pubkey::new_unique(), Role::Admin, &principal));
        assert!(!assignment.grants(&fund, Role::Admin, &Pubkey::new_unique()));
    }

    #[test]
    fn revoke_then_regrant() {
        let (fund, principal, admin) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
        let mut assignment = blank();
        assignment.activate(fund, Role::Admin, principal, principal, 0, 1);

        assert!(assignment.deactivate());
        assert!(!assignment.deactivate());
        assert!(!assignment.grants(&fund, Role::Admin, &principal));

        assert!(assignment.activate(fund, Role::Admin, principal, admin, 5, 1));
        assert_eq!(assignment.granted_by, admin);
    }

    #[test]
    fn require_role_reads_account_data() {
        let (fund, principal) = (Pubkey::new_unique(), Pubkey::new_unique());
        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 0u64;
        let mut data = vec![0u8; RoleAssignment::INIT_SPACE];
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        let mut assignment = blank();
        assignment.activate(fund, Role::Auditor, principal, principal, 0, 1);
        write_account(&info, &assignment).unwrap();

        assert!(require_role(&info, &fund, Role::Auditor, &principal).is_ok());
        assert_eq!(
            require_role(&info, &fund, Role::Admin, &principal).unwrap_err(),
            ReliefError::Unauthorized.into()
        );
    }

    #[test]
    fn missing_assignment_is_unauthorized() {
        let (fund, principal) = (Pubkey::new_unique(), Pubkey::new_unique());
        let key = Pubkey::new_unique();
        let system = anchor_lang::system_program::ID;
        let mut lamports = 0u64;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &system, false, 0);

        assert!(!role_held(&info, &fund, Role::Admin, &principal).unwrap());
        assert_eq!(
            require_role(&info, &fund, Role::Admin, &principal).unwrap_err(),
            ReliefError::Unauthorized.into()
        );
    }

    #[test]
    fn beneficiary_role_is_not_grantable() {
        assert!(Role::Admin.require_grantable().is_ok());
        assert!(Role::Auditor.require_grantable().is_ok());
        assert_eq!(
            Role::Beneficiary.require_grantable().unwrap_err(),
            ReliefError::ReservedRole.into()
        );
    }

    #[test]
    fn revoking_writes_back_once() {
        let (fund, principal) = (Pubkey::new_unique(), Pubkey::new_unique());
        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 0u64;
        let mut data = vec![0u8; RoleAssignment::INIT_SPACE];
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        let mut assignment = blank();
        assignment.activate(fund, Role::Admin, principal, principal, 0, 1);
        write_account(&info, &assignment).unwrap();

        assert!(revoke_assignment(&info).unwrap());
        assert!(!role_held(&info, &fund, Role::Admin, &principal).unwrap());
        assert!(!revoke_assignment(&info).unwrap());
    }
}
