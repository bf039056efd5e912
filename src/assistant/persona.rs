//! Brand persona injected into every assistant instruction

#[derive(Debug, Clone)]
pub struct Persona {
    pub assistant_name: String,
    pub brand: String,
    pub philosophy: String,
    /// Currency unit used for every amount the assistant mentions
    pub currency: String,
    pub products: Vec<String>,
    /// Fixed customer tier label
    pub tier: String,
}

impl Persona {
    /// `A, B, and C` style listing of the product names.
    pub fn product_list(&self) -> String {
        match self.products.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [first, second] => format!("{} and {}", first, second),
            [init @ .., last] => format!("{}, and {}", init.join(", "), last),
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            assistant_name: "RAKBANK Digital Assistant".to_string(),
            brand: "RAKBANK".to_string(),
            philosophy: "Simply Better".to_string(),
            currency: "AED".to_string(),
            products: vec![
                "RAKrewards".to_string(),
                "Red Account".to_string(),
                "Titanium Cards".to_string(),
            ],
            tier: "Elite Client".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_list() {
        let mut persona = Persona::default();
        assert_eq!(persona.product_list(), "RAKrewards, Red Account, and Titanium Cards");

        persona.products.truncate(2);
        assert_eq!(persona.product_list(), "RAKrewards and Red Account");

        persona.products.truncate(1);
        assert_eq!(persona.product_list(), "RAKrewards");

        persona.products.clear();
        assert_eq!(persona.product_list(), "");
    }
}
