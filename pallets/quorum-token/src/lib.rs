#![cfg_attr(not(feature = "std"), no_std)]
// Allow deprecated weight constants for MVP (will be replaced by benchmarks post-grant)
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

use codec::DecodeWithMemTracking;
use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_std::prelude::*;

pub use pallet::*;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod migrations;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

/// A named permission bucket. An account either holds a role or it does not;
/// there is no weighting and no hierarchy beyond `Admin` managing membership.
#[derive(
    Clone,
    Copy,
    Encode,
    Decode,
    DecodeWithMemTracking,
    Eq,
    PartialEq,
    RuntimeDebug,
    TypeInfo,
    MaxEncodedLen,
)]
pub enum Role {
    /// Grants and revokes every role, including itself.
    Admin,
    /// May pause and unpause the ledger.
    Pauser,
    /// May create and approve mint requests.
    Minter,
    /// May add accounts to and remove accounts from the blacklist.
    Blacklister,
    /// May destroy the funds of blacklisted accounts.
    Burner,
}

impl Role {
    pub const ALL: [Role; 5] =
        [Role::Admin, Role::Pauser, Role::Minter, Role::Blacklister, Role::Burner];
}

/// Whether a mint request is still collecting approvals or has been executed.
///
/// The pending amount lives inside the `Pending` variant, so an executed
/// request cannot be re-executed by construction.
#[derive(Clone, Copy, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub enum RequestStatus {
    /// Still collecting approvals for this many tokens.
    Pending(u128),
    /// The mint has been performed. Terminal.
    Executed,
}

/// A proposal to mint new tokens, requiring a fixed number of distinct
/// minter approvals before it executes.
#[derive(Clone, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct MintRequest<AccountId> {
    /// Recipient of the minted tokens. Immutable after creation.
    pub beneficiary: AccountId,
    pub status: RequestStatus,
    /// Number of distinct minters that have approved, the creator included.
    pub approvals: u32,
}

impl<AccountId> MintRequest<AccountId> {
    /// The amount still awaiting execution, or zero once executed.
    pub fn pending_amount(&self) -> u128 {
        match self.status {
            RequestStatus::Pending(amount) => amount,
            RequestStatus::Executed => 0,
        }
    }
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Token name (e.g., "Quorum Reserve Token")
    #[pallet::storage]
    #[pallet::getter(fn token_name)]
    pub type TokenName<T> = StorageValue<_, BoundedVec<u8, ConstU32<64>>, ValueQuery>;

    /// Token symbol (e.g., "QRT")
    #[pallet::storage]
    #[pallet::getter(fn token_symbol)]
    pub type TokenSymbol<T> = StorageValue<_, BoundedVec<u8, ConstU32<16>>, ValueQuery>;

    /// Total token supply
    #[pallet::storage]
    #[pallet::getter(fn total_supply)]
    pub type TotalSupply<T> = StorageValue<_, u128, ValueQuery>;

    /// Account balances
    #[pallet::storage]
    #[pallet::getter(fn balance_of)]
    pub type Balances<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// Upper bound on cumulative supply. Set at genesis, never mutated.
    #[pallet::storage]
    #[pallet::getter(fn max_supply)]
    pub type MaxSupply<T> = StorageValue<_, u128, ValueQuery>;

    /// Distinct approvals required before a mint request executes.
    /// Set at genesis, never mutated.
    #[pallet::storage]
    #[pallet::getter(fn signatures_needed)]
    pub type SignaturesNeeded<T> = StorageValue<_, u32, ValueQuery>;

    /// Whether transfers, burns and mint execution are suspended.
    #[pallet::storage]
    #[pallet::getter(fn paused)]
    pub type Paused<T> = StorageValue<_, bool, ValueQuery>;

    /// Role membership: (role, account) -> holds it.
    #[pallet::storage]
    #[pallet::getter(fn has_role)]
    pub type Roles<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        Role,
        Blake2_128Concat,
        T::AccountId,
        bool,
        ValueQuery,
    >;

    /// Blacklisted accounts, keyed to the block at which they were excluded.
    /// An absent entry means the account is not excluded.
    #[pallet::storage]
    #[pallet::getter(fn excluded_since)]
    pub type Blacklist<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, BlockNumberFor<T>, OptionQuery>;

    /// Append-only, index-addressed sequence of mint requests.
    #[pallet::storage]
    #[pallet::getter(fn mint_request)]
    pub type MintRequests<T: Config> =
        StorageMap<_, Blake2_128Concat, u32, MintRequest<T::AccountId>, OptionQuery>;

    /// Number of mint requests ever created. Also the next free index.
    #[pallet::storage]
    #[pallet::getter(fn mint_request_count)]
    pub type MintRequestCount<T> = StorageValue<_, u32, ValueQuery>;

    /// Per-request approver set: (request index, signer) -> has approved.
    #[pallet::storage]
    #[pallet::getter(fn has_signed)]
    pub type Signatures<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        u32,
        Blake2_128Concat,
        T::AccountId,
        bool,
        ValueQuery,
    >;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Tokens transferred from one account to another
        Transferred { from: T::AccountId, to: T::AccountId, amount: u128 },
        /// New tokens minted after a request reached its approval threshold
        Minted { to: T::AccountId, amount: u128 },
        /// An account destroyed part of its own balance
        Burned { from: T::AccountId, amount: u128 },
        /// A new mint request was created; the creator counts as first approver
        MintRequested { index: u32, beneficiary: T::AccountId, amount: u128, requested_by: T::AccountId },
        /// A minter approved a mint request
        MintSigned { index: u32, signer: T::AccountId, approvals: u32 },
        /// Account added to the blacklist
        AddedToBlacklist { account: T::AccountId },
        /// Account removed from the blacklist
        RemovedFromBlacklist { account: T::AccountId },
        /// The entire balance of a blacklisted account was destroyed
        ExcludedFundsBurned { account: T::AccountId, amount: u128 },
        /// Transfers, burns and mint execution suspended
        Paused,
        /// Suspension lifted
        Unpaused,
        /// Role granted to an account
        RoleGranted { role: Role, account: T::AccountId },
        /// Role revoked from an account
        RoleRevoked { role: Role, account: T::AccountId },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Caller does not hold the role the operation requires
        MissingRole,
        /// The account is already blacklisted
        AlreadyExcluded,
        /// The account is not blacklisted
        NotExcluded,
        /// Sender of a transfer is blacklisted
        SenderExcluded,
        /// Receiver of a transfer (or mint beneficiary) is blacklisted
        ReceiverExcluded,
        /// Mint request beneficiary is blacklisted
        TargetExcluded,
        /// The ledger is paused
        TokenPaused,
        /// The ledger is not paused
        NotPaused,
        /// The ledger is already paused
        AlreadyPaused,
        /// Mint requests must be for a non-zero amount
        ZeroAmount,
        /// No mint request exists at this index
        WrongIndex,
        /// This minter has already approved this request
        AlreadySigned,
        /// The request has already been executed
        AlreadyMinted,
        /// Executing would push total supply past the immutable cap
        SupplyCapExceeded,
        /// The blacklisted account holds no funds to destroy
        NothingToBurn,
        InsufficientBalance,
        Overflow,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Move `amount` tokens from the caller to `to`.
        ///
        /// Rejected if either side is blacklisted or the ledger is paused.
        #[pallet::call_index(0)]
        #[pallet::weight(10_000)]
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::ensure_transfer_allowed(Some(&sender), Some(&to))?;

            let sender_balance = Balances::<T>::get(&sender);
            ensure!(sender_balance >= amount, Error::<T>::InsufficientBalance);

            Balances::<T>::insert(&sender, sender_balance - amount);
            Balances::<T>::try_mutate(&to, |balance| -> DispatchResult {
                *balance = balance.checked_add(amount).ok_or(Error::<T>::Overflow)?;
                Ok(())
            })?;

            Self::deposit_event(Event::Transferred { from: sender, to, amount });
            Ok(())
        }

        /// Destroy `amount` tokens from the caller's own balance.
        #[pallet::call_index(1)]
        #[pallet::weight(10_000)]
        pub fn burn(origin: OriginFor<T>, amount: u128) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_transfer_allowed(Some(&who), None)?;

            let balance = Balances::<T>::get(&who);
            ensure!(balance >= amount, Error::<T>::InsufficientBalance);

            Balances::<T>::insert(&who, balance - amount);
            TotalSupply::<T>::try_mutate(|supply| -> DispatchResult {
                *supply = supply.checked_sub(amount).ok_or(Error::<T>::Overflow)?;
                Ok(())
            })?;

            Self::deposit_event(Event::Burned { from: who, amount });
            Ok(())
        }

        /// Suspend transfers, burns and mint execution.
        #[pallet::call_index(2)]
        #[pallet::weight(10_000)]
        pub fn pause(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Pauser, &who)?;
            ensure!(!Paused::<T>::get(), Error::<T>::AlreadyPaused);

            Paused::<T>::put(true);
            Self::deposit_event(Event::Paused);
            Ok(())
        }

        /// Lift the suspension.
        #[pallet::call_index(3)]
        #[pallet::weight(10_000)]
        pub fn unpause(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Pauser, &who)?;
            ensure!(Paused::<T>::get(), Error::<T>::NotPaused);

            Paused::<T>::put(false);
            Self::deposit_event(Event::Unpaused);
            Ok(())
        }

        /// Grant `role` to `account`. Idempotent.
        #[pallet::call_index(4)]
        #[pallet::weight(10_000)]
        pub fn grant_role(origin: OriginFor<T>, role: Role, account: T::AccountId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Admin, &who)?;

            Roles::<T>::insert(role, &account, true);
            Self::deposit_event(Event::RoleGranted { role, account });
            Ok(())
        }

        /// Revoke `role` from `account`. Idempotent.
        #[pallet::call_index(5)]
        #[pallet::weight(10_000)]
        pub fn revoke_role(origin: OriginFor<T>, role: Role, account: T::AccountId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Admin, &who)?;

            Roles::<T>::remove(role, &account);
            Self::deposit_event(Event::RoleRevoked { role, account });
            Ok(())
        }

        /// Add `account` to, or remove it from, the blacklist.
        ///
        /// Adding records the current block as the exclusion moment. Re-adding
        /// an excluded account and removing a non-excluded one are rejected.
        #[pallet::call_index(6)]
        #[pallet::weight(10_000)]
        pub fn set_excluded(
            origin: OriginFor<T>,
            account: T::AccountId,
            excluded: bool,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Blacklister, &who)?;

            if excluded {
                ensure!(!Blacklist::<T>::contains_key(&account), Error::<T>::AlreadyExcluded);
                Blacklist::<T>::insert(&account, frame_system::Pallet::<T>::block_number());
                Self::deposit_event(Event::AddedToBlacklist { account });
            } else {
                ensure!(Blacklist::<T>::contains_key(&account), Error::<T>::NotExcluded);
                Blacklist::<T>::remove(&account);
                Self::deposit_event(Event::RemovedFromBlacklist { account });
            }
            Ok(())
        }

        /// Destroy the entire balance of a blacklisted account.
        ///
        /// Deliberately bypasses the transfer gate: the gate would always
        /// reject an excluded account, and this operation exists to act on
        /// exactly those. Works while paused for the same reason.
        #[pallet::call_index(7)]
        #[pallet::weight(10_000)]
        pub fn burn_excluded_funds(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Burner, &who)?;
            ensure!(Blacklist::<T>::contains_key(&account), Error::<T>::NotExcluded);

            let amount = Balances::<T>::get(&account);
            ensure!(amount > 0, Error::<T>::NothingToBurn);

            Balances::<T>::remove(&account);
            TotalSupply::<T>::try_mutate(|supply| -> DispatchResult {
                *supply = supply.checked_sub(amount).ok_or(Error::<T>::Overflow)?;
                Ok(())
            })?;

            Self::deposit_event(Event::ExcludedFundsBurned { account, amount });
            Ok(())
        }

        /// Propose minting `amount` tokens to `beneficiary`.
        ///
        /// The caller's approval is counted immediately; the request executes
        /// once `SignaturesNeeded` distinct minters have approved via
        /// `sign_mint`. The cap check here is point-in-time, not a
        /// reservation: it is re-checked at execution.
        #[pallet::call_index(8)]
        #[pallet::weight(10_000)]
        pub fn request_mint(
            origin: OriginFor<T>,
            beneficiary: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Minter, &who)?;
            ensure!(amount > 0, Error::<T>::ZeroAmount);
            ensure!(!Blacklist::<T>::contains_key(&beneficiary), Error::<T>::TargetExcluded);
            ensure!(
                !Self::would_exceed_cap(amount, TotalSupply::<T>::get(), MaxSupply::<T>::get()),
                Error::<T>::SupplyCapExceeded
            );

            let index = MintRequestCount::<T>::get();
            let next = index.checked_add(1).ok_or(Error::<T>::Overflow)?;

            MintRequests::<T>::insert(
                index,
                MintRequest {
                    beneficiary: beneficiary.clone(),
                    status: RequestStatus::Pending(amount),
                    approvals: 1,
                },
            );
            Signatures::<T>::insert(index, &who, true);
            MintRequestCount::<T>::put(next);

            Self::deposit_event(Event::MintRequested { index, beneficiary, amount, requested_by: who });
            Ok(())
        }

        /// Approve the mint request at `index`.
        ///
        /// When the approval count reaches the threshold, the cap is
        /// re-checked against current supply (it may have grown since the
        /// request was admitted) and the mint is performed. A request blocked
        /// by the cap stays pending; the failed call leaves no trace, so the
        /// same signer may retry once supply has shrunk.
        #[pallet::call_index(9)]
        #[pallet::weight(10_000)]
        pub fn sign_mint(origin: OriginFor<T>, index: u32) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_role(Role::Minter, &who)?;

            MintRequests::<T>::try_mutate(index, |maybe_request| -> DispatchResult {
                let request = maybe_request.as_mut().ok_or(Error::<T>::WrongIndex)?;

                ensure!(!Signatures::<T>::get(index, &who), Error::<T>::AlreadySigned);
                Signatures::<T>::insert(index, &who, true);
                request.approvals = request.approvals.checked_add(1).ok_or(Error::<T>::Overflow)?;

                Self::deposit_event(Event::MintSigned {
                    index,
                    signer: who.clone(),
                    approvals: request.approvals,
                });

                if request.approvals >= SignaturesNeeded::<T>::get() {
                    let amount = match request.status {
                        RequestStatus::Pending(amount) => amount,
                        RequestStatus::Executed => return Err(Error::<T>::AlreadyMinted.into()),
                    };
                    ensure!(
                        !Self::would_exceed_cap(
                            amount,
                            TotalSupply::<T>::get(),
                            MaxSupply::<T>::get()
                        ),
                        Error::<T>::SupplyCapExceeded
                    );
                    request.status = RequestStatus::Executed;
                    Self::do_mint(&request.beneficiary, amount)?;
                }
                Ok(())
            })
        }
    }

    impl<T: Config> Pallet<T> {
        /// Capability check consulted at the top of every gated operation.
        pub fn ensure_role(role: Role, who: &T::AccountId) -> DispatchResult {
            ensure!(Roles::<T>::get(role, who), Error::<T>::MissingRole);
            Ok(())
        }

        /// Whether `account` is currently blacklisted.
        pub fn is_excluded(account: &T::AccountId) -> bool {
            Blacklist::<T>::contains_key(account)
        }

        /// Whether adding `delta` to `supply` would pass `cap`.
        /// An arithmetic overflow counts as exceeding.
        pub fn would_exceed_cap(delta: u128, supply: u128, cap: u128) -> bool {
            match delta.checked_add(supply) {
                Some(proposed) => proposed > cap,
                None => true,
            }
        }

        /// The gate in front of every ordinary balance movement. Mints pass
        /// `from = None`, self-burns pass `to = None`. `burn_excluded_funds`
        /// is the single caller that skips this.
        fn ensure_transfer_allowed(
            from: Option<&T::AccountId>,
            to: Option<&T::AccountId>,
        ) -> DispatchResult {
            if let Some(from) = from {
                ensure!(!Blacklist::<T>::contains_key(from), Error::<T>::SenderExcluded);
            }
            if let Some(to) = to {
                ensure!(!Blacklist::<T>::contains_key(to), Error::<T>::ReceiverExcluded);
            }
            ensure!(!Paused::<T>::get(), Error::<T>::TokenPaused);
            Ok(())
        }

        /// Ledger mint primitive. Runs the transfer gate for the recipient,
        /// so a beneficiary blacklisted after the request was created still
        /// cannot receive tokens.
        fn do_mint(to: &T::AccountId, amount: u128) -> DispatchResult {
            Self::ensure_transfer_allowed(None, Some(to))?;

            let new_supply =
                TotalSupply::<T>::get().checked_add(amount).ok_or(Error::<T>::Overflow)?;
            let new_balance =
                Balances::<T>::get(to).checked_add(amount).ok_or(Error::<T>::Overflow)?;

            TotalSupply::<T>::put(new_supply);
            Balances::<T>::insert(to, new_balance);

            Self::deposit_event(Event::Minted { to: to.clone(), amount });
            Ok(())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Deployer-designated owner. Receives every role and the initial mint.
        pub owner: Option<T::AccountId>,
        /// Distinct approvals required per mint request (>= 1)
        pub signatures_needed: u32,
        /// Tokens minted to the owner at genesis (>= 1)
        pub initial_mint: u128,
        /// Immutable supply cap (>= initial mint)
        pub max_supply: u128,
        /// Token name (>= 3 bytes)
        pub token_name: Vec<u8>,
        /// Token symbol (>= 2 bytes)
        pub token_symbol: Vec<u8>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let Some(owner) = &self.owner else {
                // No token configured at genesis.
                return;
            };

            assert!(self.signatures_needed >= 1, "At least one signature must be required");
            assert!(self.initial_mint >= 1, "Initial mint must be non-zero");
            assert!(
                self.max_supply >= self.initial_mint,
                "Max supply must cover the initial mint"
            );
            assert!(self.token_name.len() >= 3, "Token name too short (min 3 bytes)");
            assert!(self.token_symbol.len() >= 2, "Token symbol too short (min 2 bytes)");

            let name: BoundedVec<u8, ConstU32<64>> =
                self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
            TokenName::<T>::put(name);

            let symbol: BoundedVec<u8, ConstU32<16>> =
                self.token_symbol.clone().try_into().expect("Token symbol too long (max 16 bytes)");
            TokenSymbol::<T>::put(symbol);

            SignaturesNeeded::<T>::put(self.signatures_needed);
            MaxSupply::<T>::put(self.max_supply);

            for role in Role::ALL {
                Roles::<T>::insert(role, owner, true);
            }

            Balances::<T>::insert(owner, self.initial_mint);
            TotalSupply::<T>::put(self.initial_mint);
        }
    }
}
