use std::fmt;

// =============================================================================
// Milestone 1: Product families
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brand {
    Bmw,
    Tesla,
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Brand::Bmw => write!(f, "BMW"),
            Brand::Tesla => write!(f, "Tesla"),
        }
    }
}

/// Capability shared by every car, whatever its category.
pub trait Car {
    fn brand(&self) -> Brand;

    fn model(&self) -> &'static str;

    fn label(&self) -> String {
        format!("{} {}", self.brand(), self.model())
    }

    /// The notification line, label padded so the messages line up.
    fn head_light_message(&self) -> String {
        format!("{:<15}Turn on head light.", format!("{}:", self.label()))
    }

    fn turn_on_head_light(&self) {
        println!("{}", self.head_light_message());
    }
}

pub trait Sedan: Car {}

pub trait Suv: Car {}

#[derive(Debug, Default)]
pub struct BmwM5;

#[derive(Debug, Default)]
pub struct BmwX5;

#[derive(Debug, Default)]
pub struct TeslaModelS;

#[derive(Debug, Default)]
pub struct TeslaModelX;

impl Car for BmwM5 {
    fn brand(&self) -> Brand {
        Brand::Bmw
    }

    fn model(&self) -> &'static str {
        "M5"
    }
}

impl Sedan for BmwM5 {}

impl Car for BmwX5 {
    fn brand(&self) -> Brand {
        Brand::Bmw
    }

    fn model(&self) -> &'static str {
        "X5"
    }
}

impl Suv for BmwX5 {}

impl Car for TeslaModelS {
    fn brand(&self) -> Brand {
        Brand::Tesla
    }

    fn model(&self) -> &'static str {
        "Model S"
    }
}

impl Sedan for TeslaModelS {}

impl Car for TeslaModelX {
    fn brand(&self) -> Brand {
        Brand::Tesla
    }

    fn model(&self) -> &'static str {
        "Model X"
    }
}

impl Suv for TeslaModelX {}

// =============================================================================
// Milestone 2: Factories
// =============================================================================

/// A factory fixes one product per category through its associated types,
/// so it can never hand out another brand's car.
pub trait CarFactory {
    type Sedan: Sedan;
    type Suv: Suv;

    fn brand(&self) -> Brand;

    fn create_sedan(&self) -> Self::Sedan;

    fn create_suv(&self) -> Self::Suv;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BmwFactory;

#[derive(Debug, Default, Clone, Copy)]
pub struct TeslaFactory;

impl CarFactory for BmwFactory {
    type Sedan = BmwM5;
    type Suv = BmwX5;

    fn brand(&self) -> Brand {
        Brand::Bmw
    }

    fn create_sedan(&self) -> BmwM5 {
        BmwM5
    }

    fn create_suv(&self) -> BmwX5 {
        BmwX5
    }
}

impl CarFactory for TeslaFactory {
    type Sedan = TeslaModelS;
    type Suv = TeslaModelX;

    fn brand(&self) -> Brand {
        Brand::Tesla
    }

    fn create_sedan(&self) -> TeslaModelS {
        TeslaModelS
    }

    fn create_suv(&self) -> TeslaModelX {
        TeslaModelX
    }
}

// =============================================================================
// Milestone 3: Client composing one family
// =============================================================================

pub struct BrandBooth<F: CarFactory> {
    brand: Brand,
    sedan: F::Sedan,
    suv: F::Suv,
}

impl<F: CarFactory> BrandBooth<F> {
    pub fn new(factory: &F) -> Self {
        Self {
            brand: factory.brand(),
            sedan: factory.create_sedan(),
            suv: factory.create_suv(),
        }
    }

    pub fn brand(&self) -> Brand {
        self.brand
    }

    pub fn sedan(&self) -> &F::Sedan {
        &self.sedan
    }

    pub fn suv(&self) -> &F::Suv {
        &self.suv
    }

    pub fn head_light_messages(&self) -> [String; 2] {
        [
            self.sedan.head_light_message(),
            self.suv.head_light_message(),
        ]
    }

    pub fn show_head_light(&self) {
        self.sedan.turn_on_head_light();
        self.suv.turn_on_head_light();
    }
}

// =============================================================================
// Milestone 4: Choosing a family at runtime
// =============================================================================

/// Object-safe view of a booth, so booths of different brands can share a Vec.
pub trait Showroom {
    fn brand(&self) -> Brand;

    fn head_light_messages(&self) -> [String; 2];

    fn show_head_light(&self);
}

impl<F: CarFactory> Showroom for BrandBooth<F> {
    fn brand(&self) -> Brand {
        BrandBooth::brand(self)
    }

    fn head_light_messages(&self) -> [String; 2] {
        BrandBooth::head_light_messages(self)
    }

    fn show_head_light(&self) {
        BrandBooth::show_head_light(self)
    }
}

pub fn booth_for(brand: Brand) -> Box<dyn Showroom> {
    match brand {
        Brand::Bmw => Box::new(BrandBooth::new(&BmwFactory)),
        Brand::Tesla => Box::new(BrandBooth::new(&TeslaFactory)),
    }
}

/// The booths shown by the demo, in display order.
pub fn demo_booths() -> Vec<Box<dyn Showroom>> {
    [Brand::Bmw, Brand::Tesla].into_iter().map(booth_for).collect()
}

// =============================================================================
// Demo (cargo run --bin abstract_factory)
// =============================================================================

fn main() {
    for booth in demo_booths() {
        booth.show_head_light();
    }
}

// =============================================================================
// Tests
// =============================================================================
