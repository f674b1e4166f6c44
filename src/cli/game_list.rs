use crate::dtos::product::ProductResponse;

/// Renders the catalog as a text shelf. Pure formatting: no IO, no mutation.
pub fn render_game_list(games: &[ProductResponse]) -> String {
    if games.is_empty() {
        return "El estante está vacío.\nAgrega nuevos juegos de mesa para que aparezcan aquí.\n"
            .to_string();
    }

    let mut out = String::new();
    for game in games {
        let badge = if game.available { "Disponible" } else { "Agotado" };
        out.push_str(&format!("{}  [{}]\n", game.name, badge));
        out.push_str(&format!("  {}\n", game.description));
        out.push_str(&format!(
            "  ${:.2}  (stock: {})  id: {}\n\n",
            game.price, game.stock, game.id
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str, price: f64, available: bool) -> ProductResponse {
        ProductResponse {
            id: format!("id-{name}"),
            name: name.to_string(),
            description: format!("Descripción de {name}"),
            price,
            stock: 4,
            available,
            image: None,
            category_id: "c-1".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn empty_shelf_renders_placeholder() {
        let out = render_game_list(&[]);
        assert!(out.contains("El estante está vacío"));
        assert!(out.contains("Agrega nuevos juegos de mesa"));
    }

    #[test]
    fn prices_are_formatted_with_two_decimals() {
        let out = render_game_list(&[game("Catan", 39.9, true)]);
        assert!(out.contains("$39.90"));
    }

    #[test]
    fn availability_badge_is_binary() {
        let out = render_game_list(&[game("Catan", 39.9, true), game("Dixit", 24.5, false)]);
        assert!(out.contains("Catan  [Disponible]"));
        assert!(out.contains("Dixit  [Agotado]"));
    }

    #[test]
    fn every_record_shows_name_and_description() {
        let out = render_game_list(&[game("Carcassonne", 29.99, true)]);
        assert!(out.contains("Carcassonne"));
        assert!(out.contains("Descripción de Carcassonne"));
    }
}
