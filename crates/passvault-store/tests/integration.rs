//! Integration tests for the passvault-store crate.
//!
//! These exercise the full lifecycle the way a frontend would: startup
//! migration, registration, login, vault round-trips, admin credential
//! changes, and account deletion — all against a real temporary data
//! directory.

use passvault_crypto::{EmbeddedKeyProvider, MasterKeyProvider, SecretCipher, looks_encrypted};
use passvault_store::{
    AccountStore, AdminStore, DataDir, VaultEntry, VaultStore, migrate_admin_credential,
};

struct Fixture {
    _tmp: tempfile::TempDir,
    dir: DataDir,
    cipher: SecretCipher,
}

impl Fixture {
    fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(tmp.path());
        let cipher = SecretCipher::new(EmbeddedKeyProvider.master_key().unwrap());
        Self { _tmp: tmp, dir, cipher }
    }

    fn accounts(&self) -> AccountStore {
        AccountStore::new(self.dir.clone()).unwrap()
    }

    fn vaults(&self) -> VaultStore {
        VaultStore::new(self.dir.clone(), self.cipher.clone())
    }

    fn admin(&self) -> AdminStore {
        AdminStore::new(self.dir.clone(), self.cipher.clone())
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Account lifecycle
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn register_login_logout() {
    let fx = Fixture::new();
    let accounts = fx.accounts();

    assert!(accounts.register("alice", "alice@x.com", "secret1"));

    let session = accounts.authenticate("alice", "secret1").expect("login by username");
    assert_eq!(session.account().email, "alice@x.com");
    session.logout();

    let session = accounts.authenticate("ALICE@X.COM", "secret1").expect("login by email");
    assert_eq!(session.username(), "alice");

    assert!(accounts.authenticate("alice", "wrong").is_none());
}

#[test]
fn uniqueness_is_case_insensitive() {
    let fx = Fixture::new();
    let accounts = fx.accounts();

    assert!(accounts.register("alice", "alice@x.com", "secret1"));
    assert!(!accounts.register("ALICE", "other@y.com", "longenough"));
    assert!(!accounts.register("bob", "ALICE@X.COM", "longenough"));

    assert!(accounts.register("bob", "bob@y.com", "secret2"));
    assert_eq!(accounts.list().len(), 2);
}

#[test]
fn concurrent_sessions_are_independent() {
    let fx = Fixture::new();
    let accounts = fx.accounts();
    accounts.register("alice", "alice@x.com", "secret1");
    accounts.register("bob", "bob@y.com", "secret2");

    let alice = accounts.authenticate("alice", "secret1").unwrap();
    let bob = accounts.authenticate("bob", "secret2").unwrap();

    // No shared current-user state: both sessions stay valid, and
    // dropping one does not affect the other.
    assert_eq!(alice.username(), "alice");
    bob.logout();
    assert_eq!(alice.username(), "alice");
}

#[test]
fn delete_account_removes_vault_and_recreates_empty_on_next_load() {
    let fx = Fixture::new();
    let accounts = fx.accounts();
    let vaults = fx.vaults();

    accounts.register("alice", "alice@x.com", "secret1");
    vaults.save(
        "alice",
        &[VaultEntry::protect("site", "alice", "pw", &fx.cipher).unwrap()],
    );
    assert_eq!(vaults.load("alice").len(), 1);

    assert!(accounts.delete("alice@x.com"));
    assert!(accounts.authenticate("alice", "secret1").is_none());

    // The vault is gone; loading recreates an empty header-only file.
    let entries = vaults.load("alice");
    assert!(entries.is_empty());
    let vault_file = fx.dir.vault_file("alice");
    assert_eq!(
        std::fs::read_to_string(vault_file).unwrap(),
        "Website/App Name,Username/Email,Password\n"
    );
}

// ═══════════════════════════════════════════════════════════════════════
//  Vault round-trips
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn vault_roundtrip_reencrypts_every_save() {
    let fx = Fixture::new();
    let vaults = fx.vaults();

    let entries = vec![
        VaultEntry::protect("github.com", "alice", "gh-pw", &fx.cipher).unwrap(),
        VaultEntry::protect("bank.example", "alice@x.com", "bank-pw", &fx.cipher).unwrap(),
    ];
    vaults.save("alice", &entries);

    let first = vaults.load("alice");
    vaults.save("alice", &first);
    let second = vaults.load("alice");

    // Same logical content, fresh tokens on every rewrite.
    for (a, b) in first.iter().zip(&second) {
        assert_eq!((a.website.as_str(), a.username.as_str()), (b.website.as_str(), b.username.as_str()));
        assert_ne!(a.secret, b.secret);
        assert_eq!(a.reveal(&fx.cipher), b.reveal(&fx.cipher));
    }
    assert_eq!(second[0].reveal(&fx.cipher), "gh-pw");
    assert_eq!(second[1].reveal(&fx.cipher), "bank-pw");
}

#[test]
fn vault_files_are_isolated_per_owner() {
    let fx = Fixture::new();
    let vaults = fx.vaults();

    vaults.save("alice", &[VaultEntry::protect("a", "alice", "pa", &fx.cipher).unwrap()]);
    vaults.save("bob", &[VaultEntry::protect("b", "bob", "pb", &fx.cipher).unwrap()]);

    assert_eq!(vaults.load("alice")[0].website, "a");
    assert_eq!(vaults.load("bob")[0].website, "b");
}

// ═══════════════════════════════════════════════════════════════════════
//  Admin record and migration
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn startup_migration_upgrades_legacy_admin_record() {
    let fx = Fixture::new();
    let admin = fx.admin();

    // A legacy installation: plaintext credentials on disk.
    let path = fx.dir.admin_file();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "admin,admin\n").unwrap();

    migrate_admin_credential(&admin);

    let content = std::fs::read_to_string(&path).unwrap();
    let secret = content.trim_end().strip_prefix("admin,").unwrap();
    assert!(looks_encrypted(secret));
    assert_eq!(fx.cipher.decrypt_str(secret).unwrap(), "admin");

    // Idempotent: a second run leaves the file byte-identical.
    migrate_admin_credential(&admin);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);

    // And the migrated credential still authenticates.
    assert!(admin.authenticate("admin", "admin"));
}

#[test]
fn migration_then_credential_change() {
    let fx = Fixture::new();
    let admin = fx.admin();

    migrate_admin_credential(&admin); // no file yet: no-op
    assert!(admin.authenticate("admin", "admin")); // lazy default creation

    assert!(admin.change_credentials("admin", "root@x.com", "better-pw"));
    assert!(admin.authenticate("root@x.com", "better-pw"));
    assert!(!admin.authenticate("admin", "admin"));

    // The rewritten secret is encrypted on disk.
    let content = std::fs::read_to_string(fx.dir.admin_file()).unwrap();
    let secret = content.trim_end().strip_prefix("root@x.com,").unwrap();
    assert!(looks_encrypted(secret));
}
