use serde::{Deserialize, Serialize};

use crate::scoring::FavoritismInputs;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub inputs: FavoritismInputs,
}
