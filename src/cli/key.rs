//! Key command implementation

use crate::cli::KeyArgs;
use crate::key;

/// Handle `geomux key` command
pub fn handle_key(args: &KeyArgs) -> String {
    key::compose(&args.address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_key() {
        let args = KeyArgs {
            address: "Bedford, Bedfordshire, England".to_string(),
        };
        assert_eq!(handle_key(&args), "dnalgneerihsdrofdebdrofdeb");
    }

    #[test]
    fn test_handle_key_blank() {
        let args = KeyArgs {
            address: "   ".to_string(),
        };
        assert_eq!(handle_key(&args), "");
    }
}
