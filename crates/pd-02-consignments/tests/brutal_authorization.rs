//! # Brutal Authorization Tests for Consignments (pd-02)
//!
//! These tests attempt to move a consignment without holding the role the
//! move requires.
//!
//! ## Test Categories
//!
//! 1. **Impersonation** - every operation called by every wrong party
//! 2. **Stale Holders** - replaced consignees and verifiers
//! 3. **Unregistered Parties** - naming addresses the registry does not know
//! 4. **Random Walks** - arbitrary call sequences never break the invariants

use pd_02_consignments::domain::check_all_invariants;
use pd_02_consignments::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =============================================================================
// TEST HELPERS
// =============================================================================

const FACTORY: Address = Address::repeat_byte(0xfa);
const OWNER: Address = Address::repeat_byte(0x0f);
const CONSIGNOR: Address = Address::repeat_byte(0x0c);
const CONSIGNEE: Address = Address::repeat_byte(0x0d);
const VERIFIER: Address = Address::repeat_byte(0x05);
const MALLORY: Address = Address::repeat_byte(0x66);

const EVERYONE: [Address; 6] = [OWNER, CONSIGNOR, CONSIGNEE, VERIFIER, MALLORY, Address::ZERO];

fn ctx(sender: Address) -> CallContext {
    CallContext::new(sender)
}

fn setup() -> (PlusDConsignments, Address) {
    let mut plusd = PlusDConsignments::new(FACTORY, OWNER);
    plusd
        .register_consignor(&ctx(OWNER), CONSIGNOR, RegistrationNumber::new("C"))
        .unwrap();
    plusd
        .register_consignee(&ctx(OWNER), CONSIGNEE, RegistrationNumber::new("D"))
        .unwrap();
    plusd
        .register_verifier(&ctx(OWNER), VERIFIER, RegistrationNumber::new("V"))
        .unwrap();
    let address = plusd
        .create_consignment(&ctx(CONSIGNOR), CONSIGNEE, Requirements::new("explosive goods"))
        .unwrap()
        .output;
    (plusd, address)
}

fn snapshot(plusd: &PlusDConsignments, address: Address) -> Consignment {
    plusd.consignment(address).unwrap().clone()
}

// =============================================================================
// IMPERSONATION
// =============================================================================

#[test]
fn test_only_owner_registers() {
    let (mut plusd, _) = setup();
    for caller in EVERYONE.into_iter().filter(|a| *a != OWNER) {
        for role in Role::ALL {
            let err = plusd
                .register(&ctx(caller), role, MALLORY, RegistrationNumber::new("fake"))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Unauthorized);
        }
    }
    for role in Role::ALL {
        assert!(!plusd.registry().is_registered(role, MALLORY));
    }
}

#[test]
fn test_only_consignor_assigns_consignee() {
    let (mut plusd, address) = setup();
    let before = snapshot(&plusd, address);

    for caller in EVERYONE.into_iter().filter(|a| *a != CONSIGNOR) {
        let err = plusd
            .assign_consignee(&ctx(caller), address, CONSIGNEE)
            .unwrap_err();
        assert_eq!(
            err,
            ConsignmentError::Unauthorized {
                caller,
                required: Authority::Consignor(CONSIGNOR),
            }
        );
        assert_eq!(snapshot(&plusd, address), before);
    }
}

#[test]
fn test_only_consignee_assigns_verifier() {
    let (mut plusd, address) = setup();
    let before = snapshot(&plusd, address);

    for caller in EVERYONE.into_iter().filter(|a| *a != CONSIGNEE) {
        let err = plusd
            .assign_verifier(&ctx(caller), address, VERIFIER)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(snapshot(&plusd, address), before);
    }
}

#[test]
fn test_only_verifier_verifies() {
    let (mut plusd, address) = setup();
    plusd
        .assign_verifier(&ctx(CONSIGNEE), address, VERIFIER)
        .unwrap();
    let before = snapshot(&plusd, address);

    for caller in EVERYONE.into_iter().filter(|a| *a != VERIFIER) {
        let err = plusd.verify_requirements(&ctx(caller), address).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(snapshot(&plusd, address), before);
    }
}

#[test]
fn test_zero_address_never_verifies_unassigned_record() {
    let (mut plusd, address) = setup();
    let err = plusd
        .verify_requirements(&ctx(Address::ZERO), address)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[test]
fn test_verify_twice_is_invalid_state() {
    let (mut plusd, address) = setup();
    plusd
        .assign_verifier(&ctx(CONSIGNEE), address, VERIFIER)
        .unwrap();
    plusd.verify_requirements(&ctx(VERIFIER), address).unwrap();

    let err = plusd
        .verify_requirements(&ctx(VERIFIER), address)
        .unwrap_err();
    assert_eq!(
        err,
        ConsignmentError::InvalidState {
            operation: Operation::VerifyRequirements,
            state: ConsignmentState::RequirementsVerified,
        }
    );
}

// =============================================================================
// STALE HOLDERS
// =============================================================================

#[test]
fn test_cleared_verifier_cannot_verify() {
    let (mut plusd, address) = setup();
    plusd
        .assign_verifier(&ctx(CONSIGNEE), address, VERIFIER)
        .unwrap();
    plusd
        .assign_consignee(&ctx(CONSIGNOR), address, CONSIGNEE)
        .unwrap();

    let err = plusd
        .verify_requirements(&ctx(VERIFIER), address)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert!(snapshot(&plusd, address).verifier().is_zero());
}

#[test]
fn test_consignor_cannot_act_as_consignee() {
    let (mut plusd, address) = setup();
    let err = plusd
        .assign_verifier(&ctx(CONSIGNOR), address, VERIFIER)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

// =============================================================================
// UNREGISTERED PARTIES
// =============================================================================

#[test]
fn test_unregistered_parties_are_rejected() {
    let (mut plusd, address) = setup();

    let err = plusd
        .assign_consignee(&ctx(CONSIGNOR), address, MALLORY)
        .unwrap_err();
    assert_eq!(
        err,
        ConsignmentError::InvalidParty {
            address: MALLORY,
            role: Role::Consignee,
        }
    );

    let err = plusd
        .assign_verifier(&ctx(CONSIGNEE), address, MALLORY)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParty);

    // A verifier registered under another role is still not a consignee.
    let err = plusd
        .create_consignment(&ctx(CONSIGNOR), VERIFIER, Requirements::new("x"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParty);
}

#[test]
fn test_registered_consignee_cannot_create() {
    let (mut plusd, _) = setup();
    let err = plusd
        .create_consignment(&ctx(CONSIGNEE), CONSIGNEE, Requirements::new("x"))
        .unwrap_err();
    assert_eq!(
        err,
        ConsignmentError::Unauthorized {
            caller: CONSIGNEE,
            required: Authority::RegisteredConsignor,
        }
    );
}

// =============================================================================
// RANDOM WALKS
// =============================================================================

#[test]
fn test_random_call_sequences_preserve_invariants() {
    const CONSIGNEE_2: Address = Address::repeat_byte(0x2d);
    const VERIFIER_2: Address = Address::repeat_byte(0x25);
    const PARTIES: [Address; 8] = [
        OWNER,
        CONSIGNOR,
        CONSIGNEE,
        CONSIGNEE_2,
        VERIFIER,
        VERIFIER_2,
        MALLORY,
        Address::ZERO,
    ];

    let mut rng = StdRng::seed_from_u64(0x9e37_79b9);
    let (mut plusd, address) = setup();
    plusd
        .register_consignee(&ctx(OWNER), CONSIGNEE_2, RegistrationNumber::new("D2"))
        .unwrap();
    plusd
        .register_verifier(&ctx(OWNER), VERIFIER_2, RegistrationNumber::new("V2"))
        .unwrap();

    let mut handovers = 0;
    for _ in 0..4_000 {
        let caller = PARTIES[rng.gen_range(0..PARTIES.len())];
        let party = PARTIES[rng.gen_range(0..PARTIES.len())];
        let before = snapshot(&plusd, address);

        let (operation, result) = match rng.gen_range(0..3) {
            0 => (
                Operation::AssignConsignee,
                plusd.assign_consignee(&ctx(caller), address, party),
            ),
            1 => (
                Operation::AssignVerifier,
                plusd.assign_verifier(&ctx(caller), address, party),
            ),
            _ => (
                Operation::VerifyRequirements,
                plusd.verify_requirements(&ctx(caller), address),
            ),
        };
        let after = snapshot(&plusd, address);

        let Ok(receipt) = result else {
            assert_eq!(after, before);
            continue;
        };

        assert_eq!(receipt.logs.len(), 1);
        assert_eq!(receipt.logs[0].emitter, address);
        assert!(check_all_invariants(operation, &before, &after).is_valid());

        let expected = match operation {
            Operation::AssignConsignee => {
                assert_eq!(after.consignee(), party);
                if !before.consignee().is_zero() && before.consignee() != party {
                    handovers += 1;
                }
                PlusDEvent::ConsigneeAssigned { consignee: party }
            }
            Operation::AssignVerifier => {
                assert_eq!(after.verifier(), party);
                if !before.verifier().is_zero() && before.verifier() != party {
                    handovers += 1;
                }
                PlusDEvent::VerifierAssigned { verifier: party }
            }
            Operation::VerifyRequirements => {
                assert!(after.state() > before.state());
                PlusDEvent::RequirementsVerified
            }
        };
        assert_eq!(receipt.logs[0].event, expected);
    }

    assert!(handovers > 0, "walk never moved a role to a different holder");
}

#[test]
fn test_registered_zero_address_is_never_a_party() {
    let (mut plusd, address) = setup();
    plusd
        .register_consignee(&ctx(OWNER), Address::ZERO, RegistrationNumber::new("null"))
        .unwrap();
    plusd
        .register_verifier(&ctx(OWNER), Address::ZERO, RegistrationNumber::new("null"))
        .unwrap();

    let zero_consignee = ConsignmentError::InvalidParty {
        address: Address::ZERO,
        role: Role::Consignee,
    };

    let err = plusd
        .create_consignment(&ctx(CONSIGNOR), Address::ZERO, Requirements::new("x"))
        .unwrap_err();
    assert_eq!(err, zero_consignee);
    assert_eq!(plusd.consignment_count(CONSIGNOR), 1);

    let before = snapshot(&plusd, address);
    let err = plusd
        .assign_consignee(&ctx(CONSIGNOR), address, Address::ZERO)
        .unwrap_err();
    assert_eq!(err, zero_consignee);

    let err = plusd
        .assign_verifier(&ctx(CONSIGNEE), address, Address::ZERO)
        .unwrap_err();
    assert_eq!(
        err,
        ConsignmentError::InvalidParty {
            address: Address::ZERO,
            role: Role::Verifier,
        }
    );
    assert_eq!(snapshot(&plusd, address), before);
}
