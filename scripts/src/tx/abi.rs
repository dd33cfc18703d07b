//! ABI of the presale constructor

use alloy::{
    primitives::{Address, Bytes},
    sol,
    sol_types::SolConstructor,
};

sol! {
    contract BFMTokenPresale {
        constructor(address token);
    }
}

/// Arguments passed to the presale constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructorArgs {
    /// Address of the token sold by the presale
    pub token: Address,
}

impl ConstructorArgs {
    /// Arguments of the presale constructor, the address of the sold token
    pub fn presale(token: Address) -> Self {
        Self { token }
    }

    /// ABI encode the arguments, as appended to the creation code
    pub fn abi_encode(&self) -> Vec<u8> {
        BFMTokenPresale::constructorCall { token: self.token }.abi_encode()
    }

    /// Creation code followed by the encoded arguments
    pub fn deploy_code(&self, bytecode: &Bytes) -> Bytes {
        let mut code = bytecode.to_vec();
        code.extend(self.abi_encode());
        code.into()
    }
}
