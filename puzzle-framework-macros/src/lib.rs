//! Procedural macros for the `puzzle-framework` crate.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Error, Expr, Item, ItemImpl, ItemStruct, Type, parse_macro_input, parse_quote};

/// Build a compile error at the call site.
fn call_site_error(message: &str) -> TokenStream {
    Error::new(proc_macro2::Span::call_site(), message)
        .to_compile_error()
        .into()
}

/// Procedural macro attribute that generates a `SolutionRunner` implementation.
///
/// This macro automates the implementation of the `SolutionRunner` trait for puzzle solutions,
/// routing to the appropriate solver function based on which solution types are provided.
///
/// # Properties
///
/// - `name` (required): An expression that evaluates to `&str`, representing the solution's
///   display name.
///   Can be a string literal or a constant.
///
/// - `part_one` (required): The type implementing `Solution<PartOne>` for solving part one.
///
/// - `part_two` (optional): The type implementing `Solution<PartTwo>` for solving part two.
///   If omitted, only part one will be solved.
///
/// - `parsed` (optional): A type that implements `ParseData`, used to parse input before solving.
///   If omitted, the unparsed input string is passed directly to solvers.
///
/// - `context` (optional): The `Solution::Context` type shared by the parts, passed to every run.
///   Defaults to `()`.
///
/// # Errors
///
/// Returns a compile error if:
/// - Applied to anything other than a struct or impl block
/// - Required properties (`name`, `part_one`) are missing
/// - Any property is specified more than once
/// - An unsupported property is provided
///
/// # Examples
///
/// ## With `part_one`
///
/// With a struct `Lines` implementing `Solution<PartOne>` with a `()` context:
///
/// ```ignore
/// #[solution_runner(name = "Lines", part_one = Lines)]
/// struct LinesRunner;
/// ```
///
/// ## With `parsed` and `context`
///
/// With a struct `PipeMaze` implementing `ParseData`, a struct `Day10` implementing both
/// `Solution<PartOne>` & `Solution<PartTwo>` with a `Settings` context and a struct
/// `Puzzles<const DAY: u8>` for solutions to run:
///
/// ```ignore
/// const NAME: &str = "Day 10: Pipe Maze";
/// #[solution_runner(
///     name = NAME,
///     context = Settings,
///     parsed = PipeMaze,
///     part_one = Day10,
///     part_two = Day10
/// )]
/// impl Puzzles<10> {}
/// ```
#[proc_macro_attribute]
pub fn solution_runner(args: TokenStream, input: TokenStream) -> TokenStream {
    // The expression to use as a solution name; should resolve to string slice
    let mut name_expr_opt: Option<Expr> = None;
    // The type passed by reference to every part
    let mut context_ty_opt: Option<Type> = None;
    // The type to use for a `ParseData` generic parameter
    let mut parsed_ty_opt: Option<Type> = None;
    // The type to use for a `Solution<PartOne>` generic parameter
    let mut part_one_ty_opt: Option<Type> = None;
    // The type to use for a `Solution<PartTwo>` generic parameter
    let mut part_two_ty_opt: Option<Type> = None;

    let solution_runner_parser = syn::meta::parser(|meta| {
        // check for expected property keys, track value, error if a duplicate key appears
        if meta.path.is_ident("name") {
            if name_expr_opt.is_some() {
                return Err(meta.error("duplicate 'name' property"));
            }
            name_expr_opt = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("context") {
            if context_ty_opt.is_some() {
                return Err(meta.error("duplicate 'context' property"));
            }
            context_ty_opt = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("parsed") {
            if parsed_ty_opt.is_some() {
                return Err(meta.error("duplicate 'parsed' property"));
            }
            parsed_ty_opt = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("part_one") {
            if part_one_ty_opt.is_some() {
                return Err(meta.error("duplicate 'part_one' property"));
            }
            part_one_ty_opt = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("part_two") {
            if part_two_ty_opt.is_some() {
                return Err(meta.error("duplicate 'part_two' property"));
            }
            part_two_ty_opt = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported solution runner property"))
        }
    });
    parse_macro_input!(args with solution_runner_parser);

    // enforce required properties
    let Some(name_expr) = name_expr_opt else {
        return call_site_error("missing required property: 'name'");
    };
    let Some(part_one_ty) = part_one_ty_opt else {
        return call_site_error("missing required property: 'part_one'");
    };
    let context_ty: Type = context_ty_opt.unwrap_or_else(|| parse_quote!(()));

    let solve_function_call = match (parsed_ty_opt, part_two_ty_opt) {
        (None, None) => {
            quote! {
                puzzle_framework::runner::solve_half_solution::<#context_ty, #part_one_ty>(
                    #name_expr,
                    input,
                    context,
                    handler,
                    timed
                )
            }
        }
        (None, Some(part_two_ty)) => {
            quote! {
                puzzle_framework::runner::solve_full_solution::<
                    #context_ty,
                    #part_one_ty,
                    #part_two_ty
                >(#name_expr, input, context, handler, timed)
            }
        }
        (Some(parsed_ty), None) => {
            quote! {
                puzzle_framework::runner::solve_parsed_half_solution::<
                    #context_ty,
                    #parsed_ty,
                    #part_one_ty
                >(#name_expr, input, context, handler, timed)
            }
        }
        (Some(parsed_ty), Some(part_two_ty)) => {
            quote! {
                puzzle_framework::runner::solve_parsed_full_solution::<
                    #context_ty,
                    #parsed_ty,
                    #part_one_ty,
                    #part_two_ty
                >(#name_expr, input, context, handler, timed)
            }
        }
    };

    let original_input = input.clone(); // clone before macro consumes input
    let item = parse_macro_input!(input as Item);

    let runner_ty: Type = match item {
        // extracted struct name through `ident`
        Item::Struct(ItemStruct { ident, .. }) => parse_quote!(#ident),
        // extracted type from impl block through `self_ty`
        Item::Impl(ItemImpl { self_ty, .. }) => *self_ty,
        _ => {
            return call_site_error(
                "the #[solution_runner] macro can only be applied to a struct or an impl block",
            );
        }
    };

    let input_ts = proc_macro2::TokenStream::from(original_input);
    TokenStream::from(quote! {
        #input_ts
        impl puzzle_framework::runner::SolutionRunner<#context_ty> for #runner_ty {
            fn run(
                input: &str,
                context: &#context_ty,
                handler: &mut dyn puzzle_framework::runner::OutputHandler,
                timed: bool
            ) -> puzzle_framework::DynamicResult<()> {
                #solve_function_call
            }
        }
    })
}
