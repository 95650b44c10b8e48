pub mod inventory;
pub mod meal_plan;
pub mod preferences;
pub mod recipe;
pub mod scan;
pub mod shopping_list;

pub use inventory::{InventoryItem, InventoryItemChanges, NewInventoryItem};
pub use meal_plan::{
    MealPlan, MealPlanChanges, MealPlanItem, MealPlanItemChanges, MealPlanItemPayload, MealType,
    NewMealPlan, NewMealPlanItem,
};
pub use preferences::{PreferencesPayload, PreferencesResponse, PreferencesUpsert, UserPreferences};
pub use recipe::{
    NewRecipe, NewRecipeIngredient, Recipe, RecipeChanges, RecipeIngredient, RecipePayload,
    RecipeWithIngredients, UserRecipe, UserRecipeUpsert,
};
pub use scan::{NewScanRecord, ScanRecord};
pub use shopping_list::{
    NewShoppingList, NewShoppingListItem, ShoppingList, ShoppingListChanges, ShoppingListItem,
    ShoppingListItemChanges,
};
