//! Benchmarking setup for pallet-quorum-token

use super::*;

#[allow(unused)]
use crate::Pallet as QuorumToken;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

fn prepare_ledger<T: Config>(supply: u128, cap: u128) {
    TotalSupply::<T>::put(supply);
    MaxSupply::<T>::put(cap);
    SignaturesNeeded::<T>::put(2);
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn transfer() {
        let caller: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, 0);
        let amount: u128 = 1_000_000;

        prepare_ledger::<T>(10_000_000, u128::MAX);
        Balances::<T>::insert(&caller, 10_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), recipient.clone(), amount);

        assert_eq!(Balances::<T>::get(&recipient), amount);
    }

    #[benchmark]
    fn burn() {
        let caller: T::AccountId = whitelisted_caller();

        prepare_ledger::<T>(1_000_000, u128::MAX);
        Balances::<T>::insert(&caller, 1_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), 400_000);

        assert_eq!(Balances::<T>::get(&caller), 600_000);
    }

    #[benchmark]
    fn pause() {
        let caller: T::AccountId = whitelisted_caller();
        Roles::<T>::insert(Role::Pauser, &caller, true);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller));

        assert_eq!(Paused::<T>::get(), true);
    }

    #[benchmark]
    fn unpause() {
        let caller: T::AccountId = whitelisted_caller();
        Roles::<T>::insert(Role::Pauser, &caller, true);
        Paused::<T>::put(true);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller));

        assert_eq!(Paused::<T>::get(), false);
    }

    #[benchmark]
    fn grant_role() {
        let caller: T::AccountId = whitelisted_caller();
        let grantee: T::AccountId = account("grantee", 0, 0);
        Roles::<T>::insert(Role::Admin, &caller, true);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), Role::Minter, grantee.clone());

        assert_eq!(Roles::<T>::get(Role::Minter, &grantee), true);
    }

    #[benchmark]
    fn revoke_role() {
        let caller: T::AccountId = whitelisted_caller();
        let holder: T::AccountId = account("holder", 0, 0);
        Roles::<T>::insert(Role::Admin, &caller, true);
        Roles::<T>::insert(Role::Minter, &holder, true);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), Role::Minter, holder.clone());

        assert_eq!(Roles::<T>::get(Role::Minter, &holder), false);
    }

    #[benchmark]
    fn set_excluded() {
        let caller: T::AccountId = whitelisted_caller();
        let target: T::AccountId = account("target", 0, 0);
        Roles::<T>::insert(Role::Blacklister, &caller, true);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), target.clone(), true);

        assert_eq!(Blacklist::<T>::contains_key(&target), true);
    }

    #[benchmark]
    fn burn_excluded_funds() {
        let caller: T::AccountId = whitelisted_caller();
        let target: T::AccountId = account("target", 0, 0);
        Roles::<T>::insert(Role::Burner, &caller, true);
        prepare_ledger::<T>(1_000_000, u128::MAX);
        Balances::<T>::insert(&target, 1_000_000);
        Blacklist::<T>::insert(&target, frame_system::Pallet::<T>::block_number());

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), target.clone());

        assert_eq!(Balances::<T>::get(&target), 0);
        assert_eq!(TotalSupply::<T>::get(), 0);
    }

    #[benchmark]
    fn request_mint() {
        let caller: T::AccountId = whitelisted_caller();
        let beneficiary: T::AccountId = account("beneficiary", 0, 0);
        Roles::<T>::insert(Role::Minter, &caller, true);
        prepare_ledger::<T>(0, u128::MAX);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), beneficiary, 1_000_000);

        assert_eq!(MintRequestCount::<T>::get(), 1);
    }

    #[benchmark]
    fn sign_mint() {
        let requester: T::AccountId = account("requester", 0, 0);
        let caller: T::AccountId = whitelisted_caller();
        let beneficiary: T::AccountId = account("beneficiary", 0, 0);
        Roles::<T>::insert(Role::Minter, &requester, true);
        Roles::<T>::insert(Role::Minter, &caller, true);
        prepare_ledger::<T>(0, u128::MAX);

        QuorumToken::<T>::request_mint(
            RawOrigin::Signed(requester).into(),
            beneficiary.clone(),
            1_000_000,
        )
        .expect("request succeeds");

        // The caller's approval is the second of two, so this call executes.
        #[extrinsic_call]
        _(RawOrigin::Signed(caller), 0);

        assert_eq!(Balances::<T>::get(&beneficiary), 1_000_000);
    }

    impl_benchmark_test_suite!(QuorumToken, crate::mock::new_test_ext(), crate::mock::Test);
}
