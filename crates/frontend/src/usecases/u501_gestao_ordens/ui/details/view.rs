use super::view_model::EdicaoOrdemViewModel;
use crate::shared::components::modal::Modal;
use crate::shared::icons::icon;
use leptos::prelude::*;
use std::collections::BTreeMap;
use thaw::{Button, ButtonAppearance};

#[component]
pub fn EdicaoOrdem(
    codigo: String,
    nome: String,
    on_saved: Callback<BTreeMap<String, f64>>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = EdicaoOrdemViewModel::new(codigo.clone(), nome.clone());
    vm.carregar();

    // Clone vm for multiple closures
    let vm_clone = vm.clone();
    let vm_erro = vm.clone();
    let vm_when = vm.clone();
    let vm_body = vm.clone();
    let vm_save = vm.clone();

    view! {
        <Modal
            title=format!("Editar Ordem {}", codigo)
            on_close=Callback::new(move |_| on_cancel.run(()))
        >
            <div class="details-container ordem-details">
                <div class="details-header">
                    <p class="details-header__line">{format!("Código: {}", vm_clone.codigo)}</p>
                    <p class="details-header__line">{format!("Nome: {}", vm_clone.nome)}</p>
                </div>

                {
                    let vm = vm_erro.clone();
                    move || vm.erro.get().map(|e| view! { <div class="error">{e}</div> })
                }

                <Show
                    when={
                        let vm = vm_when.clone();
                        move || !vm.carregando.get()
                    }
                    fallback=|| view! { <p class="details-loading">"Carregando..."</p> }
                >
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">"Excipiente"</th>
                                <th class="table__header-cell">"Quantidade (Kg)"</th>
                                <th class="table__header-cell">"Ações"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {
                                let vm = vm_body.clone();
                                move || {
                                    let vm_linhas = vm.clone();
                                    vm.itens.get().into_iter().enumerate().map(|(index, (excipiente, texto))| {
                                        let vm_input = vm_linhas.clone();
                                        let vm_remove = vm_linhas.clone();
                                        view! {
                                            <tr class="table__row">
                                                <td class="table__cell">{excipiente.clone()}</td>
                                                <td class="table__cell">
                                                    <input
                                                        type="text"
                                                        class="table__input"
                                                        inputmode="decimal"
                                                        prop:value=texto
                                                        on:input=move |ev| {
                                                            vm_input.alterar_quantidade(index, event_target_value(&ev));
                                                        }
                                                    />
                                                </td>
                                                <td class="table__cell">
                                                    <Button
                                                        appearance=ButtonAppearance::Secondary
                                                        on_click=move |_| vm_remove.remover_item(index)
                                                    >
                                                        {icon("delete")}
                                                        " Remover"
                                                    </Button>
                                                </td>
                                            </tr>
                                        }
                                    }).collect_view()
                                }
                            }
                        </tbody>
                    </table>
                </Show>

                <div class="details-actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click={
                            let vm = vm_save.clone();
                            move |_| vm.salvar_command(on_saved)
                        }
                    >
                        {icon("save")}
                        " Salvar"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_cancel.run(())
                    >
                        {icon("cancel")}
                        " Cancelar"
                    </Button>
                </div>
            </div>
        </Modal>
    }
}
