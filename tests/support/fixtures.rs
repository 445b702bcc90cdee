//! Test fixtures: stub executables and sample data.

/// Stand-in for gpg. Encryption prepends an armor header and a recipient
/// line; decryption checks and strips them. `BADKEY` has no public key.
pub const GPG_STUB: &str = r#"#!/bin/sh
if [ "$1" = "-e" ] && [ "$2" = "-r" ] && [ "$4" = "--armor" ]; then
    if [ "$3" = "BADKEY" ]; then
        echo "gpg: BADKEY: skipped: No public key" >&2
        exit 2
    fi
    echo "-----BEGIN PGP MESSAGE-----"
    echo "Recipient: $3"
    cat
    exit 0
fi
if [ "$1" = "--quiet" ] && [ "$2" = "-d" ]; then
    IFS= read -r header
    if [ "$header" != "-----BEGIN PGP MESSAGE-----" ]; then
        echo "gpg: no valid OpenPGP data found." >&2
        exit 2
    fi
    IFS= read -r recipient
    cat
    exit 0
fi
echo "gpg stub: unexpected arguments: $*" >&2
exit 2
"#;

/// Stand-in for the vault password helper.
pub const VAULTPY_STUB: &str = r#"#!/bin/sh
touch "$HOME/vaultpy-ran"
if [ "$1" != "-d" ]; then
    echo "usage: vaultpy -d NAME" >&2
    exit 2
fi
case "$2" in
    vault|db.vault) echo "sekret" ;;
    *) echo "bad key" >&2; exit 1 ;;
esac
"#;

/// Stand-in for ansible-vault: checks the password from stdin, then
/// prints the secret file (which holds plain YAML in tests).
pub const ANSIBLE_VAULT_STUB: &str = r#"#!/bin/sh
if [ "$1" != "view" ] || [ "$3" != "--vault-password-file" ] || [ "$4" != "/dev/stdin" ]; then
    echo "ansible-vault stub: unexpected arguments: $*" >&2
    exit 2
fi
password=$(cat)
if [ "$password" != "sekret" ]; then
    echo "ERROR! Decryption failed (no vault secrets were found that could decrypt)" >&2
    exit 1
fi
cat "$2"
"#;

/// Stand-in for yj: turns `key: value` lines into a JSON object.
pub const YJ_STUB: &str = r#"#!/bin/sh
awk -F': ' 'BEGIN { printf "{" } NR > 1 { printf "," } { printf "\"%s\":%s", $1, $2 } END { print "}" }'
"#;

/// Placeholder vault password file contents.
pub const VAULT_BLOB: &str = "-----BEGIN PGP MESSAGE-----\n\n-----END PGP MESSAGE-----\n";
