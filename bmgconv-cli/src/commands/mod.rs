use clap::Subcommand;
use std::path::PathBuf;

pub mod convert;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a .bmg message table to XML
    #[command(name = "toXML")]
    ToXml {
        /// Source .bmg file
        input: PathBuf,

        /// Destination XML file
        output: PathBuf,
    },

    /// Convert an XML message table to .bmg
    #[command(name = "toBMG")]
    ToBmg {
        /// Source XML file
        input: PathBuf,

        /// Destination .bmg file
        output: PathBuf,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::ToXml { input, output } => convert::bmg_to_xml(input, output),
            Commands::ToBmg { input, output } => convert::xml_to_bmg(input, output),
        }
    }
}
