//! Built-in food list available before any custom food is added.

use crate::model::food::FoodCatalogEntry;

/// `(name, unit, kcal per unit, standard portion)`.
const SEED_FOODS: &[(&str, &str, f64, f64)] = &[
    // Argentina
    ("Milanesa de Carne (Frita)", "unidad", 350.0, 1.0),
    ("Milanesa de Pollo (Horno)", "unidad", 220.0, 1.0),
    ("Choripán (Clásico)", "unidad", 450.0, 1.0),
    ("Empanada Argentina (Carne)", "unidad", 280.0, 1.0),
    ("Empanada JyQ (Frita)", "unidad", 310.0, 1.0),
    ("Medialuna (Manteca)", "unidad", 180.0, 1.0),
    ("Medialuna (Grasa)", "unidad", 140.0, 1.0),
    ("Alfajor de Chocolate (Simple)", "unidad", 250.0, 1.0),
    ("Alfajor Triple", "unidad", 450.0, 1.0),
    ("Dulce de Leche", "cucharada", 60.0, 1.0),
    ("Provoleta (Rodaja)", "unidad", 300.0, 1.0),
    ("Matambre a la Pizza", "porción", 420.0, 1.0),
    ("Locro Criollo", "plato", 550.0, 1.0),
    ("Fainá", "porción", 180.0, 1.0),
    ("Sándwich de Miga (Simple)", "unidad", 150.0, 1.0),
    // Venezuela
    ("Arepa Viuda (Sola)", "unidad", 280.0, 1.0),
    ("Arepa Reina Pepiada", "unidad", 550.0, 1.0),
    ("Arepa Pelúa (Carne/Queso)", "unidad", 520.0, 1.0),
    ("Arepa Sifrina", "unidad", 580.0, 1.0),
    ("Pabellón Criollo (Plato)", "plato", 750.0, 1.0),
    ("Cachapa con Queso", "unidad", 450.0, 1.0),
    ("Tequeño (Frito)", "unidad", 320.0, 1.0),
    ("Hallaca", "unidad", 600.0, 1.0),
    ("Pan de Jamón", "rebanada", 280.0, 1.0),
    ("Tajadas (Plátano Frito)", "porción", 200.0, 1.0),
    ("Pastelito Andino", "unidad", 220.0, 1.0),
    ("Empanada Venezolana (Carne Mechada)", "unidad", 350.0, 1.0),
    ("Patacón (Relleno)", "unidad", 650.0, 1.0),
    // Proteínas generales
    ("Pechuga de Pollo (Cocida)", "g", 1.65, 150.0),
    ("Carne de Res (Magra)", "g", 2.50, 150.0),
    ("Carne Molida (5%)", "g", 1.37, 150.0),
    ("Chuleta de Cerdo", "g", 2.31, 150.0),
    ("Pescado Blanco", "g", 0.96, 200.0),
    ("Salmón (Cocido)", "g", 2.08, 150.0),
    ("Atún en Agua", "g", 1.16, 120.0),
    ("Huevo (Hervido)", "unidad", 78.0, 2.0),
    ("Huevo Frito", "unidad", 90.0, 2.0),
    ("Claras de Huevo", "unidad", 17.0, 5.0),
    ("Jamón de Pavo", "rebanada", 30.0, 3.0),
    // Carbohidratos
    ("Arroz Blanco", "g", 1.30, 150.0),
    ("Arroz Integral", "g", 1.11, 150.0),
    ("Pasta / Espagueti", "g", 1.31, 150.0),
    ("Pan Blanco", "rebanada", 67.0, 2.0),
    ("Pan Integral", "rebanada", 80.0, 2.0),
    ("Avena", "g", 3.89, 40.0),
    ("Papa (Hervida)", "g", 0.87, 200.0),
    ("Batata / Camote", "g", 0.86, 200.0),
    ("Frijoles / Caraotas", "g", 1.32, 150.0),
    // Grasas
    ("Aceite de Oliva", "cucharada", 119.0, 1.0),
    ("Mantequilla", "cucharada", 102.0, 1.0),
    ("Palta / Aguacate", "g", 1.60, 50.0),
    ("Maní / Cacahuates", "g", 5.67, 30.0),
    ("Almendras", "g", 5.79, 30.0),
    ("Queso Mozzarella", "g", 2.80, 30.0),
    // Frutas y verduras
    ("Manzana", "unidad", 95.0, 1.0),
    ("Banana / Cambur", "unidad", 105.0, 1.0),
    ("Naranja", "unidad", 62.0, 1.0),
    ("Fresas", "g", 0.32, 150.0),
    ("Tomate", "g", 0.18, 100.0),
    ("Lechuga", "g", 0.15, 50.0),
    // Otros snacks
    ("Pizza (Muzzarella)", "porción", 280.0, 2.0),
    ("Hamburguesa (Simple)", "unidad", 500.0, 1.0),
    ("Papas Fritas", "porción", 365.0, 1.0),
    ("Cerveza (Lata)", "unidad", 153.0, 1.0),
    ("Coca-Cola (Vaso)", "unidad", 140.0, 1.0),
    ("Café con Leche", "taza", 80.0, 1.0),
    ("Fernet con Coca", "vaso", 280.0, 1.0),
];

/// Returns the built-in foods in display order.
pub fn seed_foods() -> Vec<FoodCatalogEntry> {
    SEED_FOODS
        .iter()
        .map(|(name, unit, cal_per_unit, std_portion)| {
            FoodCatalogEntry::seed(name, unit, *cal_per_unit, *std_portion)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::seed_foods;
    use std::collections::HashSet;

    #[test]
    fn seed_entries_are_valid_and_not_custom() {
        let foods = seed_foods();
        assert!(foods.len() > 50);
        for food in &foods {
            food.validate().unwrap();
            assert!(!food.is_custom, "{} should be a seed food", food.name);
        }
    }

    #[test]
    fn seed_names_are_unique() {
        let foods = seed_foods();
        let names = foods.iter().map(|f| f.name.as_str()).collect::<HashSet<_>>();
        assert_eq!(names.len(), foods.len());
    }
}
