use {
    crate::{Error, Result},
    alloy::{
        dyn_abi::{DynSolValue, JsonAbiExt},
        json_abi::JsonAbi,
    },
    nftmarket_shared::primitives::Bytes,
    serde::Deserialize,
    std::path::PathBuf,
};

const ARTIFACT_EXTENSION: &str = ".json";
const DEBUG_ARTIFACT_EXTENSION: &str = ".dbg.json";

/// A compiled contract: its ABI and creation bytecode.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
struct ArtifactFile {
    abi: JsonAbi,
    #[serde(default)]
    bytecode: Option<BytecodeField>,
}

/// Hardhat writes the bytecode as a hex string, Foundry nests it under `object`.
#[derive(Deserialize)]
#[serde(untagged)]
enum BytecodeField {
    Hex(Bytes),
    Object { object: Bytes },
}

impl From<BytecodeField> for Bytes {
    fn from(value: BytecodeField) -> Self {
        match value {
            BytecodeField::Hex(bytes) | BytecodeField::Object { object: bytes } => bytes,
        }
    }
}

impl Artifact {
    pub fn new(name: impl Into<String>, abi: JsonAbi, bytecode: Bytes) -> Self {
        Self {
            name: name.into(),
            abi,
            bytecode,
        }
    }

    /// Parses a Hardhat or Foundry artifact file body.
    ///
    /// Artifacts without creation bytecode (interfaces, abstract contracts) cannot be deployed
    /// and are reported as [`Error::NotFound`].
    pub fn from_json(name: &str, json: &str) -> Result<Self> {
        let file: ArtifactFile = serde_json::from_str(json)?;
        let bytecode = file.bytecode.map(Bytes::from).unwrap_or_default();
        if bytecode.is_empty() {
            return Err(Error::not_found(format!("Deployable bytecode for {name}")));
        }

        Ok(Self::new(name, file.abi, bytecode))
    }

    /// Creation bytecode followed by the ABI-encoded constructor arguments.
    pub fn deployment_code(&self, args: &[DynSolValue]) -> Result<Bytes> {
        let mut code = self.bytecode.to_vec();
        match self.abi.constructor() {
            Some(constructor) => {
                let encoded = constructor
                    .abi_encode_input(args)
                    .map_err(|e| Error::deployment(&self.name, e))?;
                code.extend(encoded);
            }
            None if args.is_empty() => (),
            None => {
                return Err(Error::deployment(
                    &self.name,
                    format!("no constructor accepts {} arguments", args.len()),
                ));
            }
        }

        Ok(code.into())
    }
}

/// Looks up compiled artifacts by contract name below a build output directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn load(&self, name: &str) -> Result<Artifact> {
        let path = self
            .find(name)?
            .ok_or_else(|| Error::not_found(format!("Artifact {name}")))?;
        let json = std::fs::read_to_string(&path)?;

        Artifact::from_json(name, &json)
    }

    /// Depth-first search for `<name>.json`, visiting entries in file name order so that
    /// duplicate names always resolve to the same file.
    fn find(&self, name: &str) -> Result<Option<PathBuf>> {
        if !self.root.is_dir() {
            return Ok(None);
        }

        let file_name = format!("{name}{ARTIFACT_EXTENSION}");
        let mut pending = vec![self.root.clone()];
        while let Some(dir) = pending.pop() {
            let mut entries = std::fs::read_dir(&dir)?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<std::io::Result<Vec<_>>>()?;
            entries.sort();

            let mut subdirs = Vec::new();
            for path in entries {
                if path.is_dir() {
                    subdirs.push(path);
                    continue;
                }
                let Some(candidate) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                if candidate == file_name && !candidate.ends_with(DEBUG_ARTIFACT_EXTENSION) {
                    return Ok(Some(path));
                }
            }
            pending.extend(subdirs.into_iter().rev());
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address, std::fs};

    const MARKET_ABI: &str = r#"[
        {"type": "constructor", "inputs": [], "stateMutability": "nonpayable"},
        {"type": "function", "name": "getListingPrice", "inputs": [],
         "outputs": [{"name": "", "type": "uint256", "internalType": "uint256"}],
         "stateMutability": "view"}
    ]"#;

    const NFT_ABI: &str = r#"[
        {"type": "constructor", "stateMutability": "nonpayable",
         "inputs": [{"name": "marketplaceAddress", "type": "address", "internalType": "address"}]}
    ]"#;

    fn hardhat_artifact(name: &str, abi: &str) -> String {
        format!(r#"{{"contractName": "{name}", "abi": {abi}, "bytecode": "0x6080604052"}}"#)
    }

    #[test]
    fn test_store_finds_hardhat_artifact_in_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("contracts/NFTMarket.sol");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            nested.join("NFTMarket.json"),
            hardhat_artifact("NFTMarket", MARKET_ABI),
        )
        .unwrap();
        fs::write(nested.join("NFTMarket.dbg.json"), "{}").unwrap();

        let artifact = ArtifactStore::new(dir.path()).load("NFTMarket").unwrap();

        assert_eq!(artifact.name, "NFTMarket");
        assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
        assert!(artifact.abi.function("getListingPrice").is_some());
    }

    #[test]
    fn test_store_reads_foundry_bytecode_object() {
        let dir = tempfile::tempdir().unwrap();
        let json = format!(r#"{{"abi": {NFT_ABI}, "bytecode": {{"object": "0x6001"}}}}"#);
        fs::write(dir.path().join("NFT.json"), json).unwrap();

        let artifact = ArtifactStore::new(dir.path()).load("NFT").unwrap();

        assert_eq!(artifact.bytecode.to_vec(), vec![0x60, 0x01]);
    }

    #[test]
    fn test_missing_artifact_is_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let err = ArtifactStore::new(dir.path()).load("Missing").unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_missing_root_directory_is_not_found() {
        let err = ArtifactStore::new("/definitely/not/here")
            .load("NFT")
            .unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_interface_without_bytecode_is_not_found() {
        let err = Artifact::from_json("INFT", r#"{"abi": [], "bytecode": "0x"}"#).unwrap_err();

        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_deployment_code_appends_encoded_constructor_arguments() {
        let artifact = Artifact::from_json("NFT", &hardhat_artifact("NFT", NFT_ABI)).unwrap();
        let market = address!("5fbdb2315678afecb367f032d93f642f64180aa3");

        let code = artifact
            .deployment_code(&[DynSolValue::Address(market)])
            .unwrap();

        assert_eq!(code.len(), artifact.bytecode.len() + 32);
        assert_eq!(&code[code.len() - 20..], market.as_slice());
    }

    #[test]
    fn test_deployment_code_rejects_mismatched_constructor_arguments() {
        let artifact = Artifact::from_json("NFT", &hardhat_artifact("NFT", NFT_ABI)).unwrap();

        let err = artifact.deployment_code(&[]).unwrap_err();

        assert!(matches!(err, Error::Deployment { .. }));
    }
}
