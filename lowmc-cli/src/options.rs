use std::path::PathBuf;

#[derive(Clone, StructOpt)]
#[structopt(
    name = "lowmc-cli",
    about = "Generate LowMC constants and run the Picnic reference self-test",
    author = "SimulaUiB"
)]
pub enum LowMcOptions {
    #[structopt(name = "generate")]
    /// Generate the constants file for a parameter set and write it to disk.
    Generate {
        #[structopt(name = "PARAM")]
        /// Security-level tag. One of: picnic-L1, picnic-L3, picnic-L5.
        param: String,
        #[structopt(short = "o", long = "out-dir", parse(from_os_str))]
        /// Directory to write `<PARAM>.dat` into. Defaults to the current directory.
        out_dir: Option<PathBuf>,
    },
    #[structopt(name = "self-test")]
    /// Run the Picnic reference encrypt/decrypt vectors against freshly
    /// generated instances of all three parameter sets.
    SelfTest,
}
