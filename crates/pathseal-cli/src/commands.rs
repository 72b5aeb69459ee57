//! Subcommand implementations.
//!
//! Each command takes its parsed arguments and a writer for its report, so
//! tests can drive commands without a terminal.

use std::{
    error::Error,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use pathseal_client::{
    AlgorithmConfig, ContainerInfo, Protector, ProtectorConfig, SymmetricAlgorithm,
};

use crate::keyfile;

/// Boxed error returned by every command.
pub type CommandResult = Result<(), Box<dyn Error>>;

/// Generate a master key and write it to `out`.
pub fn keygen(out: &Path, report: &mut impl Write) -> CommandResult {
    let protector = Protector::new(ProtectorConfig::default())?;
    keyfile::save(out, protector.private_key())?;

    tracing::info!(key_file = %out.display(), "Generated master key");
    writeln!(report, "wrote master key to {}", out.display())?;
    writeln!(report, "public key: {}", hex::encode(protector.public_key().as_bytes()))?;
    Ok(())
}

/// Arguments shared by `encrypt` and `decrypt`.
#[derive(Debug, Clone)]
pub struct TransformArgs {
    /// Master key file
    pub key: PathBuf,
    /// File to read
    pub input: PathBuf,
    /// File to write
    pub output: PathBuf,
    /// Path the data is (or was) sealed under
    pub path: Option<String>,
    /// Bulk cipher
    pub cipher: SymmetricAlgorithm,
}

impl TransformArgs {
    fn protector(&self) -> Result<Protector, Box<dyn Error>> {
        let private_key = keyfile::load(&self.key)?;
        Ok(Protector::from_private_key(private_key, ProtectorConfig::with_symmetric(self.cipher))?)
    }

    fn path_bytes(&self) -> Option<&[u8]> {
        self.path.as_deref().map(str::as_bytes)
    }
}

/// Seal `args.input` into a container at `args.output`.
pub fn encrypt(args: &TransformArgs, report: &mut impl Write) -> CommandResult {
    let protector = args.protector()?;
    let data = fs::read(&args.input).map_err(|error| io_context(&args.input, &error))?;

    let sealed = protector.encrypt(&data, args.path_bytes())?;
    fs::write(&args.output, &sealed).map_err(|error| io_context(&args.output, &error))?;

    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        cipher = %args.cipher,
        "Sealed file"
    );
    writeln!(
        report,
        "sealed {} bytes into {} ({} bytes)",
        data.len(),
        args.output.display(),
        sealed.len()
    )?;
    Ok(())
}

/// Open the container at `args.input` and write the plaintext to `args.output`.
pub fn decrypt(args: &TransformArgs, report: &mut impl Write) -> CommandResult {
    let protector = args.protector()?;

    let plaintext = protector.open(&args.input, args.path_bytes()).map_err(|error| {
        if error.is_wrong_key() {
            tracing::warn!(input = %args.input.display(), "Key or path does not open this container");
        }
        error
    })?;
    fs::write(&args.output, &plaintext).map_err(|error| io_context(&args.output, &error))?;

    tracing::info!(input = %args.input.display(), output = %args.output.display(), "Opened file");
    writeln!(report, "opened {} bytes into {}", plaintext.len(), args.output.display())?;
    Ok(())
}

/// Print the framing of the container at `input`.
///
/// Needs no key file; the framing depends only on the wrapped key size.
pub fn inspect(input: &Path, report: &mut impl Write) -> CommandResult {
    let sealed = fs::read(input).map_err(|error| io_context(input, &error))?;
    let info = ContainerInfo::read(&sealed, &AlgorithmConfig::default())?;

    writeln!(report, "version:        {}", info.version)?;
    writeln!(report, "header length:  {}", info.header_length)?;
    writeln!(report, "wrapped keys:   {}", info.wrapped_keys.len())?;
    for (index, key) in info.wrapped_keys.iter().enumerate() {
        writeln!(report, "  [{index}] {} bytes", key.len())?;
    }
    writeln!(report, "ciphertext:     {} bytes", info.ciphertext_len)?;
    Ok(())
}

fn io_context(path: &Path, error: &std::io::Error) -> Box<dyn Error> {
    format!("{}: {error}", path.display()).into()
}
