use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{Error, Result};
use crate::models::{FoodChoice, MealSlot};

/// One entry of the fixed food catalog shipped with the app.
struct BuiltinFood {
    name: &'static str,
    image_url: &'static str,
}

const BREAKFAST_FOODS: [BuiltinFood; 5] = [
    BuiltinFood {
        name: "Pancakes",
        image_url: "https://upload.wikimedia.org/wikipedia/commons/4/43/Blueberry_pancakes_%283%29.jpg",
    },
    BuiltinFood {
        name: "Cereal",
        image_url: "https://th.bing.com/th/id/OIP.5lxR-uEQfDdKXC3Z2nRuhgHaGa?rs=1&pid=ImgDetMain",
    },
    BuiltinFood {
        name: "Omelette",
        image_url: "https://www.sweetashoney.co/wp-content/uploads/Omelette-2-1024x640.jpg",
    },
    BuiltinFood {
        name: "Toast",
        image_url: "https://www.thespruceeats.com/thmb/ucRM--oMpuYbTO7O3gOiB8LaTvo=/5190x4062/filters:fill(auto,1)/French-Toast-58addf8e5f9b58a3c9d41348.jpg",
    },
    BuiltinFood {
        name: "Smoothie",
        image_url: "https://tatyanaseverydayfood.com/wp-content/uploads/2015/01/Fruit-Smoothie.jpg",
    },
];

const LUNCH_FOODS: [BuiltinFood; 5] = [
    BuiltinFood {
        name: "Sandwich",
        image_url: "https://www.maggi.ph/sites/default/files/styles/image_744_x_419/public/srh_recipes/91afe3a3615aaa162847dc3fdcdda2da.jpg?h=476030cb&itok=xKWGntHo",
    },
    BuiltinFood {
        name: "Salad",
        image_url: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQND_ziEJuzn-YxmIuwKaWTB17XPtQs8-UKTFULGlyZEi3BL4jSnnlzqBo71jVA3DbrwrM&usqp=CAU",
    },
    BuiltinFood {
        name: "Burger",
        image_url: "https://www.ajinomoto.com.my/sites/default/files/content/recipe/image/2022-09/Malaysian-Classic-Street-Burger-new.jpg",
    },
    BuiltinFood {
        name: "Noodles",
        image_url: "https://pinchandswirl.com/wp-content/uploads/2022/11/Garlic-Butter-Noodles_sq.jpg",
    },
    BuiltinFood {
        name: "Sushi",
        image_url: "https://i.shgcdn.com/170776f5-8678-4b7b-aba7-9157fd1b5aab/-/format/auto/-/preview/3000x3000/-/quality/lighter/",
    },
];

const DINNER_FOODS: [BuiltinFood; 5] = [
    BuiltinFood {
        name: "Pizza",
        image_url: "https://images.ctfassets.net/j8tkpy1gjhi5/5OvVmigx6VIUsyoKz1EHUs/b8173b7dcfbd6da341ce11bcebfa86ea/Salami-pizza-hero.jpg?w=768&q=90&fm=webp",
    },
    BuiltinFood {
        name: "Pasta",
        image_url: "https://ministryofcurry.com/wp-content/uploads/2018/07/Pasta-with-Creamy-Tomato-Sauce-1.jpg",
    },
    BuiltinFood {
        name: "Steak",
        image_url: "https://thebigmansworld.com/wp-content/uploads/2023/07/sirloin-steak-recipe.jpg",
    },
    BuiltinFood {
        name: "Rice Bowl",
        image_url: "https://cdn.loveandlemons.com/wp-content/uploads/2020/03/bibimbap-recipe.jpg",
    },
    BuiltinFood {
        name: "Soup",
        image_url: "https://www.tasteofhome.com/wp-content/uploads/2018/01/exps7965_HSC143552A08_07_5b.jpg",
    },
];

fn builtins(slot: MealSlot) -> &'static [BuiltinFood; 5] {
    match slot {
        MealSlot::Breakfast => &BREAKFAST_FOODS,
        MealSlot::Lunch => &LUNCH_FOODS,
        MealSlot::Dinner => &DINNER_FOODS,
    }
}

/// Built-in entries for a slot as selectable choices.
#[must_use]
pub fn builtin_choices(slot: MealSlot) -> Vec<FoodChoice> {
    builtins(slot)
        .iter()
        .map(|food| FoodChoice {
            food_name: food.name.to_string(),
            image_url: Some(food.image_url.to_string()),
        })
        .collect()
}

/// The full wheel for a slot: built-ins first, then the user's catalog.
#[must_use]
pub fn wheel_for(slot: MealSlot, customs: &[FoodChoice]) -> Vec<FoodChoice> {
    let mut wheel = builtin_choices(slot);
    wheel.extend(customs.iter().cloned());
    wheel
}

/// Picks uniformly at random from the built-ins plus `customs`. Selection has
/// no persistence side effect; committing a pick is a separate step.
pub fn spin<R: Rng + ?Sized>(
    slot: MealSlot,
    customs: &[FoodChoice],
    rng: &mut R,
) -> Result<FoodChoice> {
    spin_wheel(slot, &wheel_for(slot, customs), rng)
}

/// Picks from a precomputed wheel. Lets an interactive respin loop build the
/// wheel once and spin repeatedly.
pub fn spin_wheel<R: Rng + ?Sized>(
    slot: MealSlot,
    wheel: &[FoodChoice],
    rng: &mut R,
) -> Result<FoodChoice> {
    wheel
        .choose(rng)
        .cloned()
        .ok_or(Error::NoCandidates { slot })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn custom(name: &str) -> FoodChoice {
        FoodChoice {
            food_name: name.to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_every_slot_has_five_builtins() {
        for slot in MealSlot::ALL {
            let choices = builtin_choices(slot);
            assert_eq!(choices.len(), 5);
            for choice in &choices {
                assert!(!choice.food_name.is_empty());
                assert!(choice.image_url.is_some());
            }
        }
    }

    #[test]
    fn test_wheel_is_builtins_then_customs() {
        let customs = vec![custom("Tacos"), custom("Congee")];
        let wheel = wheel_for(MealSlot::Lunch, &customs);

        assert_eq!(wheel.len(), 7);
        assert_eq!(wheel[..5], builtin_choices(MealSlot::Lunch));
        assert_eq!(wheel[5].food_name, "Tacos");
        assert_eq!(wheel[6].food_name, "Congee");
    }

    #[test]
    fn test_spin_without_customs_returns_a_builtin() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let pick = spin(MealSlot::Dinner, &[], &mut rng).unwrap();
            assert!(builtin_choices(MealSlot::Dinner).contains(&pick));
        }
    }

    #[test]
    fn test_spin_returns_member_of_union() {
        let customs = vec![custom("Tacos")];
        let wheel = wheel_for(MealSlot::Lunch, &customs);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let pick = spin(MealSlot::Lunch, &customs, &mut rng).unwrap();
            assert!(wheel.contains(&pick));
        }
    }

    #[test]
    fn test_spin_is_deterministic_for_a_seed() {
        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);
        assert_eq!(
            spin(MealSlot::Breakfast, &[], &mut first).unwrap(),
            spin(MealSlot::Breakfast, &[], &mut second).unwrap()
        );
    }

    #[test]
    fn test_single_candidate_wheel_always_wins() {
        let wheel = vec![custom("Tacos")];
        let mut rng = StdRng::seed_from_u64(0);
        let pick = spin_wheel(MealSlot::Lunch, &wheel, &mut rng).unwrap();
        assert_eq!(pick.food_name, "Tacos");
    }

    #[test]
    fn test_empty_wheel_fails() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = spin_wheel(MealSlot::Dinner, &[], &mut rng).unwrap_err();
        assert!(matches!(
            err,
            Error::NoCandidates {
                slot: MealSlot::Dinner
            }
        ));
    }
}
