use crate::entities::*;

/// Contract violations of the order intake.
///
/// These abort the whole batch operation; they are caller bugs, unlike
/// cache misses or geocoder trouble, which are ordinary data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderInvalidation {
    /// An order line with a zero quantity.
    Quantity,
    /// The delivery address exceeds the persistable key length.
    Address,
}

pub fn order(order: &Order) -> Result<(), OrderInvalidation> {
    if order.lines.iter().any(|line| line.quantity < 1) {
        return Err(OrderInvalidation::Quantity);
    }
    if order.delivery_address.as_str().len() > Address::MAX_LEN {
        return Err(OrderInvalidation::Address);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_order(lines: Vec<OrderLine>) -> Order {
        Order {
            id: OrderId::new(1),
            delivery_address: "Somewhere 1".into(),
            lines,
        }
    }

    #[test]
    fn an_order_without_lines_is_valid() {
        assert_eq!(Ok(()), order(&new_order(vec![])));
    }

    #[test]
    fn zero_quantity_is_a_contract_violation() {
        let invalid = new_order(vec![
            OrderLine {
                product: ProductId::new(1),
                quantity: 2,
            },
            OrderLine {
                product: ProductId::new(2),
                quantity: 0,
            },
        ]);
        assert_eq!(Err(OrderInvalidation::Quantity), order(&invalid));
    }

    #[test]
    fn overlong_address_is_rejected() {
        let mut invalid = new_order(vec![]);
        invalid.delivery_address = "x".repeat(Address::MAX_LEN + 1).into();
        assert_eq!(Err(OrderInvalidation::Address), order(&invalid));
    }
}
