use serde::Deserialize;
use std::marker::PhantomData;
use std::mem;
use thiserror::Error;

// =============================================================================
// Milestone 1: The product
// =============================================================================

/// Per-variant configuration: display name and base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilkteaVariant {
    Signature,
    Oolong,
    Customized,
}

impl MilkteaVariant {
    pub fn name(self) -> &'static str {
        match self {
            MilkteaVariant::Signature => "Signature milktea",
            MilkteaVariant::Oolong => "Oolong milktea",
            MilkteaVariant::Customized => "Customized milktea",
        }
    }

    pub fn base_price(self) -> f64 {
        match self {
            MilkteaVariant::Signature => 5.7,
            MilkteaVariant::Oolong => 4.5,
            MilkteaVariant::Customized => 7.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Milktea {
    variant: MilkteaVariant,
    price: f64,
    topping: String,
    tea: String,
    sugar: i32,
}

impl Milktea {
    pub const DEFAULT_TOPPING: &'static str = "boba";
    pub const DEFAULT_TEA: &'static str = "regular_milktea";
    pub const DEFAULT_SUGAR: i32 = 100;

    pub fn new(variant: MilkteaVariant) -> Self {
        Self {
            variant,
            price: variant.base_price(),
            topping: Self::DEFAULT_TOPPING.to_string(),
            tea: Self::DEFAULT_TEA.to_string(),
            sugar: Self::DEFAULT_SUGAR,
        }
    }

    pub fn variant(&self) -> MilkteaVariant {
        self.variant
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn topping(&self) -> &str {
        &self.topping
    }

    pub fn tea(&self) -> &str {
        &self.tea
    }

    pub fn sugar(&self) -> i32 {
        self.sugar
    }

    /// Name padded to 20 columns, then topping, tea and sugar.
    pub fn describe(&self) -> String {
        format!(
            "{:<20}{} {} {}",
            format!("{}:", self.variant.name()),
            self.topping,
            self.tea,
            self.sugar
        )
    }
}

// =============================================================================
// Milestone 2: Builders
// =============================================================================

/// Step-by-step assembly of one milktea.
///
/// The expected order is `reset`, `add_topping`, `add_tea`, `add_sugar_level`,
/// then `get_product`. Nothing enforces it: a skipped step leaves whatever value
/// the in-progress product already holds. See [`MilkteaOrder`] for the staged
/// variant that rejects a skipped step at compile time.
///
/// [`CustomizedMilkteaBuilder`] also has inherent `add_topping(value)`,
/// `add_tea(value)` and `add_sugar_level(value)`. Method calls on that concrete
/// type resolve to those; reach the recipe-driven steps below through a
/// `dyn MilkteaBuilder` or as `MilkteaBuilder::add_topping(&mut builder)`.
pub trait MilkteaBuilder {
    /// Drops the in-progress product and starts a fresh, default-valued one.
    fn reset(&mut self);

    fn add_topping(&mut self);

    fn add_tea(&mut self);

    fn add_sugar_level(&mut self);

    fn product(&self) -> &Milktea;

    /// Renders the in-progress product. The builder keeps its state.
    fn get_product(&self) -> String {
        self.product().describe()
    }
}

#[derive(Debug, Clone)]
pub struct SignatureMilkteaBuilder {
    product: Milktea,
}

impl SignatureMilkteaBuilder {
    pub fn new() -> Self {
        Self {
            product: Milktea::new(MilkteaVariant::Signature),
        }
    }
}

impl Default for SignatureMilkteaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MilkteaBuilder for SignatureMilkteaBuilder {
    fn reset(&mut self) {
        self.product = Milktea::new(MilkteaVariant::Signature);
    }

    fn add_topping(&mut self) {
        self.product.topping = "boba".to_string();
    }

    fn add_tea(&mut self) {
        self.product.tea = "signature tea".to_string();
    }

    fn add_sugar_level(&mut self) {
        self.product.sugar = 100;
    }

    fn product(&self) -> &Milktea {
        &self.product
    }
}

#[derive(Debug, Clone)]
pub struct OolongMilkteaBuilder {
    product: Milktea,
}

impl OolongMilkteaBuilder {
    pub fn new() -> Self {
        Self {
            product: Milktea::new(MilkteaVariant::Oolong),
        }
    }
}

impl Default for OolongMilkteaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MilkteaBuilder for OolongMilkteaBuilder {
    fn reset(&mut self) {
        self.product = Milktea::new(MilkteaVariant::Oolong);
    }

    fn add_topping(&mut self) {
        self.product.topping = "grass jelly".to_string();
    }

    fn add_tea(&mut self) {
        self.product.tea = "oolong".to_string();
    }

    fn add_sugar_level(&mut self) {
        self.product.sugar = 50;
    }

    fn product(&self) -> &Milktea {
        &self.product
    }
}

// =============================================================================
// Milestone 3: Customized builder and recipe config
// =============================================================================

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Invalid recipe: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Field values the customized builder applies when driven without arguments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Recipe {
    pub topping: String,
    pub tea: String,
    pub sugar: i32,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            topping: Milktea::DEFAULT_TOPPING.to_string(),
            tea: Milktea::DEFAULT_TEA.to_string(),
            sugar: Milktea::DEFAULT_SUGAR,
        }
    }
}

impl Recipe {
    pub fn from_toml_str(content: &str) -> Result<Self, RecipeError> {
        Ok(toml::from_str(content)?)
    }
}

#[derive(Debug, Clone)]
pub struct CustomizedMilkteaBuilder {
    recipe: Recipe,
    product: Milktea,
}

impl CustomizedMilkteaBuilder {
    pub fn new() -> Self {
        Self::with_recipe(Recipe::default())
    }

    pub fn with_recipe(recipe: Recipe) -> Self {
        Self {
            recipe,
            product: Milktea::new(MilkteaVariant::Customized),
        }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    // Explicit-value steps. Method calls on this type pick these over the
    // trait's recipe-driven steps of the same name.

    pub fn add_topping(&mut self, topping: impl Into<String>) {
        self.product.topping = topping.into();
    }

    pub fn add_tea(&mut self, tea: impl Into<String>) {
        self.product.tea = tea.into();
    }

    /// Accepts any value; out-of-range sugar is stored as given.
    pub fn add_sugar_level(&mut self, sugar_level: i32) {
        self.product.sugar = sugar_level;
    }
}

impl Default for CustomizedMilkteaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MilkteaBuilder for CustomizedMilkteaBuilder {
    fn reset(&mut self) {
        self.product = Milktea::new(MilkteaVariant::Customized);
    }

    fn add_topping(&mut self) {
        self.product.topping = self.recipe.topping.clone();
    }

    fn add_tea(&mut self) {
        self.product.tea = self.recipe.tea.clone();
    }

    fn add_sugar_level(&mut self) {
        self.product.sugar = self.recipe.sugar;
    }

    fn product(&self) -> &Milktea {
        &self.product
    }
}

// =============================================================================
// Milestone 4: Director
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilkteaKind {
    Signature,
    Oolong,
    Customized,
}

impl From<&str> for MilkteaKind {
    /// Anything other than `"signature"` or `"oolong"` is a customized milktea.
    fn from(kind: &str) -> Self {
        match kind {
            "signature" => MilkteaKind::Signature,
            "oolong" => MilkteaKind::Oolong,
            _ => MilkteaKind::Customized,
        }
    }
}

impl MilkteaKind {
    pub fn builder(self) -> Box<dyn MilkteaBuilder> {
        match self {
            MilkteaKind::Signature => Box::new(SignatureMilkteaBuilder::new()),
            MilkteaKind::Oolong => Box::new(OolongMilkteaBuilder::new()),
            MilkteaKind::Customized => Box::new(CustomizedMilkteaBuilder::new()),
        }
    }
}

pub struct MilkteaDirector {
    builder: Box<dyn MilkteaBuilder>,
}

impl MilkteaDirector {
    pub fn new(builder: Box<dyn MilkteaBuilder>) -> Self {
        Self { builder }
    }

    pub fn builder(&self) -> &dyn MilkteaBuilder {
        self.builder.as_ref()
    }

    /// Swaps in `builder` and hands back the previous one untouched.
    ///
    /// Whatever the previous builder had in progress is abandoned, not
    /// finalized: the director never renders it.
    pub fn change_builder(&mut self, builder: Box<dyn MilkteaBuilder>) -> Box<dyn MilkteaBuilder> {
        mem::replace(&mut self.builder, builder)
    }

    pub fn make_milktea(&mut self) -> String {
        self.builder.reset();
        self.builder.add_topping();
        self.builder.add_tea();
        self.builder.add_sugar_level();

        self.builder.get_product()
    }

    pub fn make(&mut self, kind: &str) -> String {
        self.change_builder(MilkteaKind::from(kind).builder());
        self.make_milktea()
    }
}

// =============================================================================
// Milestone 5: Staged builder (compile-time step order)
// =============================================================================

pub struct NeedsTopping;
pub struct NeedsTea;
pub struct NeedsSugar;
pub struct Ready;

pub struct MilkteaOrder<Stage> {
    milktea: Milktea,
    _stage: PhantomData<Stage>,
}

impl<Stage> MilkteaOrder<Stage> {
    fn advance<Next>(self) -> MilkteaOrder<Next> {
        MilkteaOrder {
            milktea: self.milktea,
            _stage: PhantomData,
        }
    }
}

impl MilkteaOrder<NeedsTopping> {
    pub fn new(variant: MilkteaVariant) -> Self {
        Self {
            milktea: Milktea::new(variant),
            _stage: PhantomData,
        }
    }

    pub fn topping(mut self, topping: impl Into<String>) -> MilkteaOrder<NeedsTea> {
        self.milktea.topping = topping.into();
        self.advance()
    }
}

impl MilkteaOrder<NeedsTea> {
    pub fn tea(mut self, tea: impl Into<String>) -> MilkteaOrder<NeedsSugar> {
        self.milktea.tea = tea.into();
        self.advance()
    }
}

impl MilkteaOrder<NeedsSugar> {
    pub fn sugar(mut self, sugar_level: i32) -> MilkteaOrder<Ready> {
        self.milktea.sugar = sugar_level;
        self.advance()
    }
}

impl MilkteaOrder<Ready> {
    pub fn render(&self) -> String {
        self.milktea.describe()
    }

    pub fn build(self) -> Milktea {
        self.milktea
    }
}

// =============================================================================
// Demo (cargo run --bin builder)
// =============================================================================

/// Every line the demo prints, in order.
pub fn demo_lines() -> Vec<String> {
    let mut lines = Vec::new();

    // signature milktea
    let mut director = MilkteaDirector::new(Box::new(SignatureMilkteaBuilder::new()));
    lines.push(director.make_milktea());

    // oolong milktea
    director.change_builder(Box::new(OolongMilkteaBuilder::new()));
    lines.push(director.make_milktea());

    // same two through the dispatcher
    lines.push(director.make("signature"));
    lines.push(director.make("oolong"));

    // customized milktea, driven by hand
    let mut builder = CustomizedMilkteaBuilder::new();
    builder.reset();
    builder.add_topping("boba");
    builder.add_tea("Oolong");
    builder.add_sugar_level(10);
    lines.push(builder.get_product());

    lines
}

fn main() {
    for line in demo_lines() {
        println!("{line}");
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run_sequence(builder: &mut dyn MilkteaBuilder) -> String {
        builder.reset();
        builder.add_topping();
        builder.add_tea();
        builder.add_sugar_level();
        builder.get_product()
    }

    #[test]
    fn test_signature_sequence_rendering() {
        let mut builder = SignatureMilkteaBuilder::new();
        assert_eq!(
            run_sequence(&mut builder),
            "Signature milktea:  boba signature tea 100"
        );
    }

    #[test]
    fn test_oolong_sequence_rendering() {
        let mut builder = OolongMilkteaBuilder::new();
        assert_eq!(
            run_sequence(&mut builder),
            "Oolong milktea:     grass jelly oolong 50"
        );
    }

    #[test]
    fn test_customized_explicit_values() {
        let mut builder = CustomizedMilkteaBuilder::new();
        builder.reset();
        builder.add_topping("boba");
        builder.add_tea("Oolong");
        builder.add_sugar_level(10);

        assert_eq!(builder.get_product(), "Customized milktea: boba Oolong 10");
    }

    #[test]
    fn test_reset_then_get_product_renders_defaults() {
        let mut signature = SignatureMilkteaBuilder::new();
        signature.reset();
        assert_eq!(
            signature.get_product(),
            "Signature milktea:  boba regular_milktea 100"
        );

        let mut oolong = OolongMilkteaBuilder::new();
        oolong.reset();
        assert_eq!(
            oolong.get_product(),
            "Oolong milktea:     boba regular_milktea 100"
        );

        let mut customized = CustomizedMilkteaBuilder::new();
        customized.add_tea("jasmine");
        customized.reset();
        assert_eq!(
            customized.get_product(),
            "Customized milktea: boba regular_milktea 100"
        );
    }

    #[test]
    fn test_steps_overwrite_instead_of_accumulating() {
        let mut builder = CustomizedMilkteaBuilder::new();
        builder.reset();
        builder.add_topping("pudding");
        builder.add_topping("grass jelly");
        builder.add_tea("black");
        builder.add_tea("green");
        builder.add_sugar_level(80);
        builder.add_sugar_level(30);

        assert_eq!(
            builder.get_product(),
            "Customized milktea: grass jelly green 30"
        );
    }

    #[test]
    fn test_get_product_does_not_reset() {
        let mut builder = OolongMilkteaBuilder::new();
        let first = run_sequence(&mut builder);
        assert_eq!(builder.get_product(), first);
        assert_eq!(builder.product().sugar(), 50);
    }

    #[test]
    fn test_sugar_is_not_validated() {
        let mut builder = CustomizedMilkteaBuilder::new();
        builder.reset();
        builder.add_sugar_level(-20);
        assert_eq!(builder.product().sugar(), -20);

        builder.add_sugar_level(250);
        assert!(builder.get_product().ends_with(" 250"));
    }

    #[test]
    fn test_prices_follow_variant() {
        assert_eq!(SignatureMilkteaBuilder::new().product().price(), 5.7);
        assert_eq!(OolongMilkteaBuilder::new().product().price(), 4.5);
        assert_eq!(CustomizedMilkteaBuilder::new().product().price(), 7.0);
    }

    #[test]
    fn test_director_make_matches_manual_sequence() {
        let mut director = MilkteaDirector::new(Box::new(CustomizedMilkteaBuilder::new()));

        assert_eq!(
            director.make("signature"),
            run_sequence(&mut SignatureMilkteaBuilder::new())
        );
        assert_eq!(
            director.make("oolong"),
            run_sequence(&mut OolongMilkteaBuilder::new())
        );
    }

    #[test]
    fn test_director_make_unknown_kind_uses_customized_defaults() {
        let mut director = MilkteaDirector::new(Box::new(SignatureMilkteaBuilder::new()));

        assert_eq!(
            director.make("matcha"),
            "Customized milktea: boba regular_milktea 100"
        );
        assert_eq!(
            director.builder().product().variant(),
            MilkteaVariant::Customized
        );
    }

    #[test]
    fn test_milktea_kind_dispatch_is_exact() {
        assert_eq!(MilkteaKind::from("signature"), MilkteaKind::Signature);
        assert_eq!(MilkteaKind::from("oolong"), MilkteaKind::Oolong);
        assert_eq!(MilkteaKind::from("Oolong"), MilkteaKind::Customized);
        assert_eq!(MilkteaKind::from(""), MilkteaKind::Customized);
    }

    #[test]
    fn test_change_builder_abandons_previous_product() {
        let mut partial = CustomizedMilkteaBuilder::new();
        partial.reset();
        partial.add_topping("pudding");

        let mut director = MilkteaDirector::new(Box::new(partial));
        let previous = director.change_builder(Box::new(OolongMilkteaBuilder::new()));

        assert_eq!(
            previous.get_product(),
            "Customized milktea: pudding regular_milktea 100"
        );
        assert_eq!(
            director.make_milktea(),
            "Oolong milktea:     grass jelly oolong 50"
        );
    }

    #[test]
    fn test_demo_output_order() {
        assert_eq!(
            demo_lines(),
            vec![
                "Signature milktea:  boba signature tea 100",
                "Oolong milktea:     grass jelly oolong 50",
                "Signature milktea:  boba signature tea 100",
                "Oolong milktea:     grass jelly oolong 50",
                "Customized milktea: boba Oolong 10",
            ]
        );
    }

    #[test]
    fn test_staged_builder_matches_dynamic_builder() {
        let order = MilkteaOrder::new(MilkteaVariant::Customized)
            .topping("boba")
            .tea("Oolong")
            .sugar(10);
        assert_eq!(order.render(), "Customized milktea: boba Oolong 10");

        let milktea = MilkteaOrder::new(MilkteaVariant::Signature)
            .topping("boba")
            .tea("signature tea")
            .sugar(100)
            .build();
        assert_eq!(
            milktea.describe(),
            run_sequence(&mut SignatureMilkteaBuilder::new())
        );
        assert_eq!(milktea.price(), 5.7);
    }

    #[test]
    fn test_recipe_defaults_for_missing_keys() {
        let recipe = Recipe::from_toml_str("tea = \"jasmine\"").unwrap();
        assert_eq!(recipe.topping, "boba");
        assert_eq!(recipe.tea, "jasmine");
        assert_eq!(recipe.sugar, 100);

        assert_eq!(Recipe::from_toml_str("").unwrap(), Recipe::default());
    }

    #[test]
    fn test_recipe_parse_errors() {
        let err = Recipe::from_toml_str("sugar = \"lots\"").unwrap_err();
        assert!(matches!(err, RecipeError::Parse(_)));

        let err = Recipe::from_toml_str("toppings = \"boba\"").unwrap_err();
        assert!(err.to_string().starts_with("Invalid recipe"));
    }

    #[test]
    fn test_recipe_drives_trait_steps() {
        let recipe = Recipe::from_toml_str(
            "topping = \"grass jelly\"\ntea = \"jasmine\"\nsugar = 30",
        )
        .unwrap();
        let mut builder = CustomizedMilkteaBuilder::with_recipe(recipe.clone());
        assert_eq!(builder.recipe(), &recipe);

        builder.reset();
        MilkteaBuilder::add_topping(&mut builder);
        MilkteaBuilder::add_tea(&mut builder);
        MilkteaBuilder::add_sugar_level(&mut builder);
        assert_eq!(builder.product().topping(), "grass jelly");
        assert_eq!(builder.product().tea(), "jasmine");
        assert_eq!(builder.product().sugar(), 30);

        builder.add_tea("Oolong");
        assert_eq!(builder.product().tea(), "Oolong");
        assert_eq!(builder.recipe().tea, "jasmine");
    }

    #[test]
    fn test_director_uses_customized_recipe() {
        let recipe = Recipe {
            sugar: 5,
            ..Recipe::default()
        };
        let mut director =
            MilkteaDirector::new(Box::new(CustomizedMilkteaBuilder::with_recipe(recipe)));

        assert_eq!(
            director.make_milktea(),
            "Customized milktea: boba regular_milktea 5"
        );
    }
}
