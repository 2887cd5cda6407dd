pub mod beneficiary;
pub mod distribution;
pub mod donation;
pub mod fund;
pub mod role;

pub use beneficiary::*;
pub use distribution::*;
pub use donation::*;
pub use fund::*;
pub use role::*;

use anchor_lang::prelude::*;

/// Deserializes a program account that may not exist yet.
///
/// Accounts still owned by another program, or with no data, yield `None`;
/// anything else must carry `T`'s discriminator.
pub fn read_account<T: AccountDeserialize + Owner>(info: &AccountInfo) -> Result<Option<T>> {
    if info.owner != &T::owner() || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    Ok(Some(T::try_deserialize(&mut &data[..])?))
}

pub fn write_account<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    value.try_serialize(&mut writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_account_data() {
        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 0u64;
        let mut data = vec![0u8; BeneficiaryRecord::INIT_SPACE];
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        let mut record = BeneficiaryRecord::new(Pubkey::new_unique(), Pubkey::new_unique(), 3, 42, 254);
        record.credit(9).unwrap();
        write_account(&info, &record).unwrap();

        let loaded = read_account::<BeneficiaryRecord>(&info).unwrap().unwrap();
        assert_eq!(loaded.index, 3);
        assert_eq!(loaded.total_funds, 9);
        assert_eq!(loaded.principal, record.principal);
    }

    #[test]
    fn foreign_owner_reads_as_missing() {
        let key = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let mut lamports = 0u64;
        let mut data = vec![1u8; 64];
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut data, &owner, false, 0);

        assert!(read_account::<BeneficiaryRecord>(&info).unwrap().is_none());
    }

    #[test]
    fn wrong_discriminator_is_an_error() {
        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 0u64;
        let mut data = vec![0u8; CategorySpend::INIT_SPACE];
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        let spend = CategorySpend {
            record: Pubkey::new_unique(),
            category: 1,
            amount: 2,
            bump: 3,
        };
        write_account(&info, &spend).unwrap();

        assert!(read_account::<BeneficiaryRecord>(&info).is_err());
    }
}
