use async_trait::async_trait;

use super::dto::{Product, SearchPage};
use super::services::ProductCatalog;

/// In-memory catalog. Matches case-insensitively on name, brands, categories
/// and ingredient text.
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    products: Vec<Product>,
}

impl LocalCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Catalog seeded with the bundled sample products.
    pub fn sample() -> Self {
        Self::new(sample_products())
    }

    fn matches(product: &Product, needle: &str) -> bool {
        let hit = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(needle));
        hit(Some(&product.product_name))
            || hit(product.brands.as_deref())
            || hit(product.categories.as_deref())
            || hit(product.ingredients_text.as_deref())
    }
}

#[async_trait]
impl ProductCatalog for LocalCatalog {
    async fn search(&self, query: &str, page: u32, page_size: u32) -> anyhow::Result<SearchPage> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(SearchPage::default());
        }

        let matched: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| Self::matches(p, &needle))
            .collect();

        let start = (page.max(1) as usize - 1).saturating_mul(page_size as usize);
        let products = matched
            .iter()
            .skip(start)
            .take(page_size as usize)
            .map(|p| (*p).clone())
            .collect();

        Ok(SearchPage {
            count: matched.len() as u64,
            products,
        })
    }

    async fn get_by_code(&self, code: &str) -> anyhow::Result<Option<Product>> {
        Ok(self.products.iter().find(|p| p.code == code).cloned())
    }
}

fn product(code: &str, name: &str, brands: &str, categories: &str, image: &str, ingredients: &str) -> Product {
    Product {
        code: code.into(),
        product_name: name.into(),
        brands: Some(brands.into()),
        ingredients_text: Some(ingredients.into()),
        image_url: None,
        image_small_url: Some(image.into()),
        categories: Some(categories.into()),
    }
}

fn sample_products() -> Vec<Product> {
    const IMG: &str = "https://images.openfoodfacts.org/images/products";
    vec![
        product(
            "3017620425035",
            "Nutella",
            "Ferrero",
            "Spreads,Sweet spreads,Cocoa and hazelnuts spreads",
            &format!("{IMG}/301/762/042/5035/front_en.432.100.jpg"),
            "Sugar, palm oil, hazelnuts 13%, fat-reduced cocoa powder 7.4%, skimmed milk powder 6.6%, whey powder, emulsifiers: lecithins [soy], vanillin.",
        ),
        product(
            "5449000000996",
            "Coca-Cola",
            "Coca-Cola",
            "Beverages,Carbonated drinks,Sodas,Colas",
            &format!("{IMG}/544/900/000/0996/front_en.291.100.jpg"),
            "Carbonated water, high fructose corn syrup, caramel color, phosphoric acid, natural flavors, caffeine.",
        ),
        product(
            "8000500310427",
            "Kinder Bueno",
            "Ferrero,Kinder",
            "Snacks,Sweet snacks,Confectioneries,Chocolates,Filled chocolates",
            &format!("{IMG}/800/050/031/0427/front_en.207.100.jpg"),
            "Milk chocolate 31.5% (sugar, cocoa butter, cocoa mass, skimmed milk powder, concentrated butter, emulsifier: lecithins (soy), vanillin), sugar, palm oil, wheat flour, hazelnuts (10.8%), skimmed milk powder, whole milk powder, fat-reduced cocoa powder, raising agents (sodium bicarbonate, ammonium bicarbonate), salt, vanillin.",
        ),
        product(
            "8076809513722",
            "Barilla Spaghetti n.5",
            "Barilla",
            "Plant-based foods,Cereals and potatoes,Cereal grains,Pastas,Wheat pastas,Spaghetti",
            &format!("{IMG}/807/680/951/3722/front_es.176.100.jpg"),
            "Durum wheat semolina, water.",
        ),
        product(
            "3017620421006",
            "Ferrero Rocher",
            "Ferrero",
            "Snacks,Sweet snacks,Confectioneries,Chocolates,Filled chocolates",
            &format!("{IMG}/301/762/042/1006/front_en.84.100.jpg"),
            "Milk chocolate (30%) (sugar, cocoa butter, cocoa mass, skimmed milk powder, concentrated butter, emulsifier: lecithins (soy), vanillin), hazelnuts (28.5%), sugar, palm oil, wheat flour, whey powder, fat-reduced cocoa powder, raising agent (sodium bicarbonate), salt, vanillin.",
        ),
        product(
            "3033710065967",
            "Cristaline Natural Mineral Water",
            "Cristaline",
            "Beverages,Waters,Spring waters,Mineral waters,Natural mineral waters",
            &format!("{IMG}/303/371/006/5967/front_en.42.100.jpg"),
            "Natural mineral water",
        ),
        product(
            "8000500037560",
            "Kinder Surprise",
            "Ferrero,Kinder",
            "Snacks,Sweet snacks,Confectioneries,Chocolates",
            &format!("{IMG}/800/050/003/7560/front_en.84.100.jpg"),
            "Milk chocolate 47% (sugar, milk powder, cocoa butter, cocoa mass, emulsifier: lecithins (soy), vanillin), sugar, skimmed milk powder, palm oil, butter oil, emulsifier: lecithins (soy), vanillin.",
        ),
        product(
            "3168930010265",
            "Lay's Classic Potato Chips",
            "Lay's,PepsiCo",
            "Snacks,Salty snacks,Chips and crisps,Potato chips",
            &format!("{IMG}/316/893/001/0265/front_en.73.100.jpg"),
            "Potatoes, vegetable oil (sunflower, corn), salt.",
        ),
        product(
            "80177418",
            "Original Cheerios",
            "General Mills,Cheerios",
            "Breakfast cereals,Cereals and potatoes,Cereals,Oat cereals",
            &format!("{IMG}/80177418/front_en.7.100.jpg"),
            "Whole grain oats, corn starch, sugar, salt, tripotassium phosphate, vitamin E.",
        ),
        product(
            "7622210449283",
            "Oreo",
            "Mondelez,Nabisco",
            "Snacks,Sweet snacks,Biscuits and cakes,Biscuits,Sandwich biscuits,Chocolate biscuits",
            &format!("{IMG}/762/221/044/9283/front_en.344.100.jpg"),
            "Wheat flour, sugar, palm oil, fat-reduced cocoa powder 4.6%, wheat starch, glucose-fructose syrup, raising agents (potassium hydrogen carbonate, ammonium hydrogen carbonate, sodium hydrogen carbonate), salt, emulsifiers (soy lecithin, sunflower lecithin), flavor (vanillin).",
        ),
        product(
            "8001505005592",
            "San Pellegrino",
            "San Pellegrino,Nestlé",
            "Beverages,Waters,Mineral waters,Sparkling mineral waters",
            &format!("{IMG}/800/150/500/5592/front_en.93.100.jpg"),
            "Natural mineral water, carbon dioxide.",
        ),
        product(
            "5000112637922",
            "Guinness Draught",
            "Guinness",
            "Beverages,Alcoholic beverages,Beers,Stouts",
            &format!("{IMG}/500/011/263/7922/front_en.30.100.jpg"),
            "Water, malted barley, barley, hops, yeast.",
        ),
        product(
            "9002490100070",
            "Red Bull Energy Drink",
            "Red Bull",
            "Beverages,Carbonated drinks,Energy drinks",
            &format!("{IMG}/900/249/010/0070/front_en.142.100.jpg"),
            "Water, sucrose, glucose, acidity regulator (sodium citrates), carbon dioxide, taurine (0.4%), acidity regulator (magnesium carbonate), caffeine (0.03%), vitamins (niacin, pantothenic acid, B6, B12), flavorings, colors (caramel, riboflavin).",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn matches_brand_case_insensitively() {
        let catalog = LocalCatalog::sample();
        let page = catalog.search("FERRERO", 1, 20).await.unwrap();
        // Nutella, Kinder Bueno, Ferrero Rocher, Kinder Surprise
        assert_eq!(page.count, 4);
        assert!(page.products.iter().all(|p| p
            .brands
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains("ferrero")));
    }

    #[tokio::test]
    async fn matches_categories_and_ingredients() {
        let catalog = LocalCatalog::sample();
        let waters = catalog.search("mineral waters", 1, 20).await.unwrap();
        assert_eq!(waters.count, 2);

        let hops = catalog.search("hops", 1, 20).await.unwrap();
        assert_eq!(hops.count, 1);
        assert_eq!(hops.products[0].code, "5000112637922");
    }

    #[tokio::test]
    async fn paginates_and_keeps_total_count() {
        let catalog = LocalCatalog::sample();
        let first = catalog.search("snacks", 1, 2).await.unwrap();
        let second = catalog.search("snacks", 2, 2).await.unwrap();
        let beyond = catalog.search("snacks", 50, 2).await.unwrap();

        assert_eq!(first.products.len(), 2);
        assert_eq!(first.count, second.count);
        assert_ne!(first.products[0].code, second.products[0].code);
        assert!(beyond.products.is_empty());
        assert_eq!(beyond.count, first.count);
    }

    #[tokio::test]
    async fn blank_query_matches_nothing() {
        let catalog = LocalCatalog::sample();
        let page = catalog.search("  ", 1, 20).await.unwrap();
        assert_eq!(page, SearchPage::default());
    }

    #[tokio::test]
    async fn lookup_by_code() {
        let catalog = LocalCatalog::sample();
        let oreo = catalog.get_by_code("7622210449283").await.unwrap().unwrap();
        assert_eq!(oreo.product_name, "Oreo");
        assert!(catalog.get_by_code("0000").await.unwrap().is_none());
    }
}
