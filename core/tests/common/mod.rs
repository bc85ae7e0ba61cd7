#![allow(dead_code)]

use apisec_core::prelude::*;

pub const APP_PRIVATE: &str = include_str!("../fixtures/app_private.pem");
pub const APP_PRIVATE_PKCS1: &str = include_str!("../fixtures/app_private_pkcs1.pem");
pub const APP_PUBLIC: &str = include_str!("../fixtures/app_public.pem");
pub const PLATFORM_PRIVATE: &str = include_str!("../fixtures/platform_private.pem");
pub const PLATFORM_CERT: &str = include_str!("../fixtures/platform_cert.pem");
pub const PLATFORM_OLD_PRIVATE: &str = include_str!("../fixtures/platform_old_private.pem");
pub const PLATFORM_OLD_CERT: &str = include_str!("../fixtures/platform_old_cert.pem");

/// 32 bytes of 0x11.
pub const SYM_KEY: &str = "ERERERERERERERERERERERERERERERERERERERERERE=";
pub const SYM_SN: &str = "sym-1";
pub const APP_ID: &str = "wx123";
pub const URL: &str = "https://api.example.com/x";
pub const NOW: i64 = 1_700_000_000;

pub const PRIMARY_SN: &str = "platform-2";
pub const DEPRECATED_SN: &str = "platform-1";

pub fn context() -> SecurityContext {
    SecurityContext {
        sym_key: SYM_KEY.into(),
        sym_sn: SYM_SN.into(),
        private_sn: PRIMARY_SN.into(),
        private_key: APP_PRIVATE.into(),
        certificate: PLATFORM_CERT.into(),
        app_id: APP_ID.into(),
        url: URL.into(),
    }
}

pub fn primary_signer() -> PeerSigner {
    PeerSigner { sn: PRIMARY_SN.into(), private_key: PLATFORM_PRIVATE.into() }
}

pub fn deprecated_signer() -> PeerSigner {
    PeerSigner { sn: DEPRECATED_SN.into(), private_key: PLATFORM_OLD_PRIVATE.into() }
}

pub fn peer() -> PeerContext {
    PeerContext {
        app_id: APP_ID.into(),
        url: URL.into(),
        sym_key: SYM_KEY.into(),
        sym_sn: SYM_SN.into(),
        app_public_key: APP_PUBLIC.into(),
        primary: primary_signer(),
        deprecated: None,
    }
}

pub fn env_at(now: i64) -> ProtocolEnv {
    ProtocolEnv::system()
        .with_clock(FixedClock(now))
        .with_random(SeededRandom::new(7))
}
